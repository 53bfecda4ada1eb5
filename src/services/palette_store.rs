use crate::error::ApiError;
use crate::models::{AppConfig, PaletteColorConfig};
use async_trait::async_trait;
use color_grid::Palette;
use std::sync::Arc;

/// Name reported for palettes supplied inline with a request
pub const INLINE_PALETTE: &str = "custom";

/// Source of named palettes
#[async_trait]
pub trait PaletteProvider: Send + Sync {
    /// Look up a palette by name
    async fn get(&self, name: &str) -> Result<Option<Palette>, ApiError>;

    /// Names of all known palettes, sorted
    async fn list(&self) -> Result<Vec<String>, ApiError>;

    /// Palette used when a request names none
    async fn default_name(&self) -> Result<Option<String>, ApiError>;

    /// Pick the palette for a request.
    ///
    /// Inline colors win over a palette name, which wins over the default.
    async fn resolve(
        &self,
        name: Option<&str>,
        colors: Option<&[String]>,
    ) -> Result<(String, Palette), ApiError> {
        if let Some(colors) = colors {
            let palette = Palette::from_hex(&colors.iter().map(String::as_str).collect::<Vec<_>>())?;
            return Ok((INLINE_PALETTE.to_string(), palette));
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => self.default_name().await?.ok_or_else(|| {
                ApiError::BadRequest("No palette given and no default configured".to_string())
            })?,
        };

        match self.get(&name).await? {
            Some(palette) => Ok((name, palette)),
            None => Err(ApiError::PaletteNotFound(name)),
        }
    }
}

/// Palettes declared in the configuration file
pub struct ConfigPalettes {
    config: Arc<AppConfig>,
}

impl ConfigPalettes {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

/// Convert configured colors into a validated palette.
pub fn palette_from_config(colors: &[PaletteColorConfig]) -> Result<Palette, ApiError> {
    let pairs: Vec<(&str, &str)> = colors
        .iter()
        .map(|c| (c.name.as_str(), c.value.as_str()))
        .collect();
    Ok(Palette::from_named(&pairs)?)
}

#[async_trait]
impl PaletteProvider for ConfigPalettes {
    async fn get(&self, name: &str) -> Result<Option<Palette>, ApiError> {
        self.config
            .get_palette(name)
            .map(palette_from_config)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.config.palettes.keys().cloned().collect())
    }

    async fn default_name(&self) -> Result<Option<String>, ApiError> {
        Ok(self.config.default_palette_name().map(str::to_string))
    }
}
