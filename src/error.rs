use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_grid::GridError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Palette not found: {0}")]
    PaletteNotFound(String),

    #[error("{0}")]
    InvalidInput(#[from] GridError),

    #[error("Upload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// A recompute failed; the run still serves the result of `generation`.
    #[error("{source} (serving generation {generation})")]
    Stale {
        generation: u64,
        #[source]
        source: Box<ApiError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RunNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PaletteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Render(RenderError::ImageDecode(_)) => StatusCode::BAD_REQUEST,
            ApiError::Render(RenderError::EmptyUpload) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Stale { source, .. } => source.status_code(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Empty image upload")]
    EmptyUpload,

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl From<color_grid::ImageError> for ApiError {
    fn from(e: color_grid::ImageError) -> Self {
        ApiError::InvalidInput(e.into())
    }
}

impl From<color_grid::PaletteError> for ApiError {
    fn from(e: color_grid::PaletteError) -> Self {
        ApiError::InvalidInput(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let body = match &self {
            ApiError::Stale { generation, .. } => json!({
                "status": status.as_u16(),
                "error": message,
                "stale": true,
                "generation": generation,
            }),
            _ => json!({
                "status": status.as_u16(),
                "error": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
