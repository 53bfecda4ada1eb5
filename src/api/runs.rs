use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, GridReport};
use crate::services::{
    CommitOutcome, ImageDecoder, PaletteProvider, ProcessingService, RunOutput, RunRecord,
    RunStore,
};

/// Upload an image for processing
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRunRequest {
    /// Base64 image, bare or as a `data:image/...;base64,` URL
    pub image: String,
    /// Configured palette name (defaults to the configured default palette)
    #[serde(default)]
    pub palette: Option<String>,
    /// Inline palette as hex colors; takes precedence over `palette`
    #[serde(default)]
    #[schema(example = json!(["#000000", "#ffffff", "#ff0000"]))]
    pub colors: Option<Vec<String>>,
    /// Edge threshold (defaults to `edges.default_threshold`)
    #[serde(default)]
    pub threshold: Option<u8>,
}

/// New edge threshold for an existing run
#[derive(Debug, Deserialize, ToSchema)]
pub struct ThresholdRequest {
    pub threshold: u8,
}

/// State of a run: its id, served generation and the grid summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RunResponse {
    pub id: String,
    /// Incremented every time a recompute is published
    pub generation: u64,
    #[serde(flatten)]
    pub report: GridReport,
}

impl From<&RunRecord> for RunResponse {
    fn from(record: &RunRecord) -> Self {
        let out = &record.output;
        Self {
            id: record.id.clone(),
            generation: record.generation,
            report: GridReport::new(&record.palette_name, out.threshold, &out.grid, &out.edges),
        }
    }
}

/// Upload an image and run both pipelines on it
#[utoipa::path(
    post,
    path = "/api/runs",
    request_body = CreateRunRequest,
    responses(
        (status = 201, description = "Run created", body = RunResponse),
        (status = 400, description = "Invalid image, palette or color"),
        (status = 404, description = "Palette not found"),
        (status = 413, description = "Image too large"),
    ),
    tag = "Runs"
)]
pub async fn handle_create_run(
    State(config): State<Arc<AppConfig>>,
    State(decoder): State<Arc<ImageDecoder>>,
    State(palettes): State<Arc<dyn PaletteProvider>>,
    State(processing): State<Arc<ProcessingService>>,
    State(runs): State<Arc<RunStore>>,
    Json(request): Json<CreateRunRequest>,
) -> Result<(StatusCode, Json<RunResponse>), ApiError> {
    let (palette_name, palette) = palettes
        .resolve(request.palette.as_deref(), request.colors.as_deref())
        .await?;
    let image = decoder.decode_base64(&request.image)?;
    let threshold = request
        .threshold
        .unwrap_or(config.edges.default_threshold);

    tracing::info!(
        palette = %palette_name,
        colors = palette.len(),
        threshold,
        "Processing upload"
    );

    let output = processing
        .run(image.clone(), palette.clone(), threshold)
        .await?;
    let record = runs.create(palette_name, palette, image, output).await;

    Ok((StatusCode::CREATED, Json(RunResponse::from(&record))))
}

/// Get the current result of a run
#[utoipa::path(
    get,
    path = "/api/runs/{id}",
    params(("id" = String, Path, description = "Run id")),
    responses(
        (status = 200, description = "Current result", body = RunResponse),
        (status = 404, description = "Run not found"),
    ),
    tag = "Runs"
)]
pub async fn handle_get_run(
    State(runs): State<Arc<RunStore>>,
    Path(id): Path<String>,
) -> Result<Json<RunResponse>, ApiError> {
    let record = runs.get(&id).await?;
    Ok(Json(RunResponse::from(&record)))
}

/// Recompute the edge mask of a run with a new threshold
///
/// The grid does not depend on the threshold and is kept. When the
/// recompute fails the previous result stays in place and the error body
/// carries `stale: true` with the generation still served. When a newer
/// request overtook this one, its result is dropped and the currently
/// served state is returned.
#[utoipa::path(
    put,
    path = "/api/runs/{id}/threshold",
    params(("id" = String, Path, description = "Run id")),
    request_body = ThresholdRequest,
    responses(
        (status = 200, description = "Recomputed result", body = RunResponse),
        (status = 404, description = "Run not found"),
        (status = 500, description = "Recompute failed; previous result still served"),
    ),
    tag = "Runs"
)]
pub async fn handle_update_threshold(
    State(processing): State<Arc<ProcessingService>>,
    State(runs): State<Arc<RunStore>>,
    Path(id): Path<String>,
    Json(request): Json<ThresholdRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    let ticket = runs.begin(&id).await?;
    let current = runs.get(&id).await?;

    let edges = match processing
        .edges(ticket.image.clone(), request.threshold)
        .await
    {
        Ok(edges) => edges,
        Err(e) => {
            tracing::warn!(run_id = %id, error = %e, "Recompute failed, serving previous result");
            return Err(ApiError::Stale {
                generation: current.generation,
                source: Box::new(e),
            });
        }
    };

    let output = RunOutput {
        grid: current.output.grid.clone(),
        edges,
        threshold: request.threshold,
    };

    let record = match runs.commit(&ticket, output).await? {
        CommitOutcome::Applied(record) => record,
        CommitOutcome::Superseded { .. } => runs.get(&id).await?,
    };

    Ok(Json(RunResponse::from(&record)))
}
