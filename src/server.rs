//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::rendering::SvgRasterizer;
use crate::services::{ConfigPalettes, ImageDecoder, PaletteProvider, ProcessingService, RunStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub decoder: Arc<ImageDecoder>,
    pub palettes: Arc<dyn PaletteProvider>,
    pub processing: Arc<ProcessingService>,
    pub runs: Arc<RunStore>,
    pub rasterizer: Arc<SvgRasterizer>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    Ok(create_app_state_with_config(config))
}

/// Create application state around an already loaded configuration.
pub fn create_app_state_with_config(config: Arc<AppConfig>) -> AppState {
    AppState {
        decoder: Arc::new(ImageDecoder::from_config(&config)),
        palettes: Arc::new(ConfigPalettes::new(config.clone())),
        processing: Arc::new(ProcessingService::default()),
        runs: Arc::new(RunStore::with_capacity(config.limits.max_runs)),
        rasterizer: Arc::new(SvgRasterizer::new()),
        config,
    }
}

/// Request body limit for JSON uploads carrying a base64 image of `max_bytes`.
fn json_body_limit(max_bytes: usize) -> usize {
    max_bytes.div_ceil(3) * 4 + 64 * 1024
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = json_body_limit(state.decoder.max_bytes());

    Router::new()
        .route("/api/palettes", get(api::handle_list_palettes))
        .route("/api/runs", post(api::handle_create_run))
        .route("/api/runs/:id", get(api::handle_get_run))
        .route("/api/runs/:id/threshold", put(api::handle_update_threshold))
        .route("/api/runs/:id/edges.png", get(api::handle_edges_png))
        .route("/api/runs/:id/grid.svg", get(api::handle_grid_svg))
        .route("/api/runs/:id/grid.png", get(api::handle_grid_png))
        .route("/api/runs/:id/legend", get(api::handle_legend))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        // Results change on every recompute
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<ImageDecoder> {
    fn from_ref(state: &AppState) -> Self {
        state.decoder.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PaletteProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.palettes.clone()
    }
}

impl FromRef<AppState> for Arc<ProcessingService> {
    fn from_ref(state: &AppState) -> Self {
        state.processing.clone()
    }
}

impl FromRef<AppState> for Arc<RunStore> {
    fn from_ref(state: &AppState) -> Self {
        state.runs.clone()
    }
}

impl FromRef<AppState> for Arc<SvgRasterizer> {
    fn from_ref(state: &AppState) -> Self {
        state.rasterizer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_limit_covers_base64() {
        let max = 3 * 1024;
        assert!(json_body_limit(max) >= 4 * 1024);
    }
}
