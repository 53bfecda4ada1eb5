use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use color_grid::Rgb;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::rendering::{
    color_legend_text, edge_mask_png, legend_text, render_svg, SvgRasterizer, SvgVariant,
};
use crate::services::{ProcessingService, RunStore};

/// Which SVG picture to produce
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridQuery {
    /// `colored` (default), `numbered` or `outline`
    #[serde(default)]
    pub variant: Option<String>,
    /// Color of the outline variant, e.g. `rgb(255,0,0)` or `#ff0000`
    #[serde(default)]
    pub color: Option<String>,
    /// Rasterization scale for PNG output (default 1)
    #[serde(default)]
    pub scale: Option<f32>,
}

/// Optional color filter for the legend
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LegendQuery {
    #[serde(default)]
    pub color: Option<String>,
}

impl GridQuery {
    fn variant(&self) -> Result<SvgVariant, ApiError> {
        SvgVariant::from_parts(self.variant.as_deref(), self.color.as_deref())
            .map_err(ApiError::BadRequest)
    }

    fn scale(&self) -> Result<f32, ApiError> {
        match self.scale {
            None => Ok(1.0),
            Some(scale) if scale.is_finite() && scale > 0.0 => Ok(scale),
            Some(scale) => Err(ApiError::BadRequest(format!(
                "Invalid scale '{scale}' (expected a positive number)"
            ))),
        }
    }
}

fn png_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}

/// Edge mask of a run as a PNG
#[utoipa::path(
    get,
    path = "/api/runs/{id}/edges.png",
    params(("id" = String, Path, description = "Run id")),
    responses(
        (status = 200, description = "Edge mask", content_type = "image/png"),
        (status = 404, description = "Run not found"),
    ),
    tag = "Artifacts"
)]
pub async fn handle_edges_png(
    State(runs): State<Arc<RunStore>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = runs.get(&id).await?;
    let png = edge_mask_png(&record.output.edges)?;
    Ok(png_response(png))
}

/// Dot grid of a run as SVG
#[utoipa::path(
    get,
    path = "/api/runs/{id}/grid.svg",
    params(("id" = String, Path, description = "Run id"), GridQuery),
    responses(
        (status = 200, description = "Dot grid", content_type = "image/svg+xml"),
        (status = 400, description = "Unknown variant or invalid color"),
        (status = 404, description = "Run not found"),
    ),
    tag = "Artifacts"
)]
pub async fn handle_grid_svg(
    State(processing): State<Arc<ProcessingService>>,
    State(runs): State<Arc<RunStore>>,
    Path(id): Path<String>,
    Query(query): Query<GridQuery>,
) -> Result<Response, ApiError> {
    let variant = query.variant()?;
    let record = runs.get(&id).await?;
    let svg = render_svg(&record.output.grid, processing.spec(), variant);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// Dot grid of a run rasterized to PNG
#[utoipa::path(
    get,
    path = "/api/runs/{id}/grid.png",
    params(("id" = String, Path, description = "Run id"), GridQuery),
    responses(
        (status = 200, description = "Dot grid", content_type = "image/png"),
        (status = 400, description = "Unknown variant, invalid color or invalid scale"),
        (status = 404, description = "Run not found"),
    ),
    tag = "Artifacts"
)]
pub async fn handle_grid_png(
    State(processing): State<Arc<ProcessingService>>,
    State(rasterizer): State<Arc<SvgRasterizer>>,
    State(runs): State<Arc<RunStore>>,
    Path(id): Path<String>,
    Query(query): Query<GridQuery>,
) -> Result<Response, ApiError> {
    let variant = query.variant()?;
    let scale = query.scale()?;
    let record = runs.get(&id).await?;
    let svg = render_svg(&record.output.grid, processing.spec(), variant);

    let png = tokio::task::spawn_blocking(move || rasterizer.render_png(svg.as_bytes(), scale))
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))??;

    Ok(png_response(png))
}

/// Plain-text legend of a run
///
/// Lists every color with its legend number and count, followed by the
/// color of every dot. With `color`, lists only that color's dots.
#[utoipa::path(
    get,
    path = "/api/runs/{id}/legend",
    params(("id" = String, Path, description = "Run id"), LegendQuery),
    responses(
        (status = 200, description = "Legend", content_type = "text/plain"),
        (status = 400, description = "Invalid color"),
        (status = 404, description = "Run or color not found"),
    ),
    tag = "Artifacts"
)]
pub async fn handle_legend(
    State(runs): State<Arc<RunStore>>,
    Path(id): Path<String>,
    Query(query): Query<LegendQuery>,
) -> Result<Response, ApiError> {
    let record = runs.get(&id).await?;
    let grid = &record.output.grid;

    let text = match query.color.as_deref() {
        None => legend_text(grid),
        Some(color) => {
            let color = Rgb::from_str(color)
                .map_err(|e| ApiError::BadRequest(format!("Invalid color '{color}': {e}")))?;
            color_legend_text(grid, color).ok_or(ApiError::NotFound)?
        }
    };

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response())
}
