use crate::assets::AssetLoader;
use image::imageops::FilterType;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Named palettes, each an ordered list of colors
    #[serde(default)]
    pub palettes: BTreeMap<String, Vec<PaletteColorConfig>>,

    /// Palette used when a request names none
    #[serde(default = "default_palette")]
    pub default_palette: Option<String>,

    #[serde(default)]
    pub edges: EdgeConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

fn default_palette() -> Option<String> {
    Some("basic".to_string())
}

/// One palette color as written in config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteColorConfig {
    pub name: String,
    /// Hex string, `#rrggbb` or `#rgb`
    pub value: String,
}

impl PaletteColorConfig {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Edge detector settings
#[derive(Debug, Deserialize, Clone)]
pub struct EdgeConfig {
    #[serde(default = "default_threshold")]
    pub default_threshold: u8,
}

fn default_threshold() -> u8 {
    color_grid::DEFAULT_THRESHOLD
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
        }
    }
}

/// How uploads are scaled onto the sampling canvas
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SamplingConfig {
    #[serde(default)]
    pub resample: ResampleFilter,
}

/// Resampling filter, mirrors `image::imageops::FilterType`
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Request size and memory limits
#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
    /// Runs kept in memory; the oldest is evicted beyond this
    #[serde(default = "default_max_runs")]
    pub max_runs: usize,
}

fn default_max_upload() -> usize {
    20 * 1024 * 1024
}

fn default_max_runs() -> usize {
    64
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload(),
            max_runs: default_max_runs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        palettes = config.palettes.len(),
                        default_palette = ?config.default_palette,
                        threshold = config.edges.default_threshold,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Colors of a named palette
    pub fn get_palette(&self, name: &str) -> Option<&[PaletteColorConfig]> {
        self.palettes.get(name).map(Vec::as_slice)
    }

    /// Name of the default palette, if it exists
    pub fn default_palette_name(&self) -> Option<&str> {
        self.default_palette
            .as_deref()
            .filter(|name| self.palettes.contains_key(*name))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut palettes = BTreeMap::new();
        palettes.insert(
            "basic".to_string(),
            vec![
                PaletteColorConfig::new("Black", "#000000"),
                PaletteColorConfig::new("White", "#ffffff"),
                PaletteColorConfig::new("Red", "#ff0000"),
                PaletteColorConfig::new("Green", "#00ff00"),
                PaletteColorConfig::new("Blue", "#0000ff"),
                PaletteColorConfig::new("Yellow", "#ffff00"),
            ],
        );

        Self {
            palettes,
            default_palette: default_palette(),
            edges: EdgeConfig::default(),
            sampling: SamplingConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_palette_name(), Some("basic"));
        assert_eq!(config.get_palette("basic").unwrap().len(), 6);
        assert_eq!(config.edges.default_threshold, 128);
        assert_eq!(config.sampling.resample, ResampleFilter::Triangle);
        assert_eq!(config.limits.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.limits.max_runs, 64);
    }

    #[test]
    fn test_default_palette_must_exist() {
        let config = AppConfig {
            default_palette: Some("missing".to_string()),
            ..Default::default()
        };
        assert_eq!(config.default_palette_name(), None);

        let config = AppConfig {
            default_palette: None,
            ..Default::default()
        };
        assert_eq!(config.default_palette_name(), None);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
default_palette: warm
palettes:
  warm:
    - name: Brick
      value: "#b22222"
    - name: Sand
      value: "#c2b280"
edges:
  default_threshold: 40
sampling:
  resample: catmull-rom
"##;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.default_palette_name(), Some("warm"));
        let warm = config.get_palette("warm").unwrap();
        assert_eq!(warm[0], PaletteColorConfig::new("Brick", "#b22222"));
        assert_eq!(config.edges.default_threshold, 40);
        assert_eq!(config.sampling.resample, ResampleFilter::CatmullRom);
        assert_eq!(config.limits.max_upload_bytes, default_max_upload());
        assert_eq!(config.limits.max_runs, default_max_runs());
    }

    #[test]
    fn test_embedded_config_matches_fallback() {
        let embedded = AppConfig::load_from_assets(&AssetLoader::new(None));
        let fallback = AppConfig::default();

        assert_eq!(embedded.default_palette_name(), fallback.default_palette_name());
        assert_eq!(embedded.get_palette("basic"), fallback.get_palette("basic"));
        assert_eq!(embedded.edges.default_threshold, fallback.edges.default_threshold);
        assert_eq!(embedded.sampling.resample, fallback.sampling.resample);
        assert_eq!(embedded.limits.max_upload_bytes, fallback.limits.max_upload_bytes);
        assert_eq!(embedded.limits.max_runs, fallback.limits.max_runs);
    }

    #[test]
    fn test_deserialize_empty_config_uses_field_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.palettes.is_empty());
        assert_eq!(config.default_palette, Some("basic".to_string()));
        assert_eq!(config.edges.default_threshold, 128);
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("edges:\n  default_threshold: 300\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resample_filter_mapping() {
        assert_eq!(ResampleFilter::Nearest.filter_type(), FilterType::Nearest);
        assert_eq!(ResampleFilter::Lanczos3.filter_type(), FilterType::Lanczos3);
    }
}
