use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::PaletteProvider;

/// One color of a palette
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteColor {
    pub name: String,
    #[schema(example = "#ff0000")]
    pub hex: String,
}

/// A configured palette
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteInfo {
    pub name: String,
    /// True for the palette used when a request names none
    pub is_default: bool,
    /// Colors in classification priority order
    pub colors: Vec<PaletteColor>,
}

/// List configured palettes
#[utoipa::path(
    get,
    path = "/api/palettes",
    responses(
        (status = 200, description = "Configured palettes", body = Vec<PaletteInfo>),
        (status = 400, description = "A configured palette is invalid"),
    ),
    tag = "Palettes"
)]
pub async fn handle_list_palettes(
    State(palettes): State<Arc<dyn PaletteProvider>>,
) -> Result<Json<Vec<PaletteInfo>>, ApiError> {
    let default = palettes.default_name().await?;
    let mut out = Vec::new();

    for name in palettes.list().await? {
        let Some(palette) = palettes.get(&name).await? else {
            continue;
        };
        out.push(PaletteInfo {
            is_default: default.as_deref() == Some(name.as_str()),
            colors: palette
                .entries()
                .iter()
                .map(|e| PaletteColor {
                    name: e.name.clone(),
                    hex: e.color.to_hex(),
                })
                .collect(),
            name,
        });
    }

    Ok(Json(out))
}
