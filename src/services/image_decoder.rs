use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_grid::{GridSpec, RasterImage};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::error::{ApiError, RenderError};
use crate::models::AppConfig;

/// Decodes uploads and draws them onto the sampling canvas.
///
/// Every decoded image is stretched to exactly `width`×`height` (aspect
/// ratio is not preserved), so the grid always sees the same canvas.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    width: u32,
    height: u32,
    filter: FilterType,
    max_bytes: usize,
}

impl ImageDecoder {
    pub fn new(width: u32, height: u32, filter: FilterType, max_bytes: usize) -> Self {
        Self {
            width,
            height,
            filter,
            max_bytes,
        }
    }

    /// Decoder for the standard canvas using the configured filter and limits
    pub fn from_config(config: &AppConfig) -> Self {
        let spec = GridSpec::STANDARD;
        Self::new(
            spec.canvas_width,
            spec.canvas_height,
            config.sampling.resample.filter_type(),
            config.limits.max_upload_bytes,
        )
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Decode encoded image bytes (PNG, JPEG, GIF, WebP, ...) into a canvas-sized image.
    pub fn decode(&self, bytes: &[u8]) -> Result<RasterImage, ApiError> {
        if bytes.is_empty() {
            return Err(RenderError::EmptyUpload.into());
        }
        if bytes.len() > self.max_bytes {
            return Err(ApiError::PayloadTooLarge {
                size: bytes.len(),
                max: self.max_bytes,
            });
        }

        let mut rgba = image::load_from_memory(bytes)
            .map_err(RenderError::from)?
            .into_rgba8();
        let (src_w, src_h) = rgba.dimensions();

        clear_transparent(&mut rgba);
        if (src_w, src_h) != (self.width, self.height) {
            rgba = DynamicImage::ImageRgba8(rgba)
                .resize_exact(self.width, self.height, self.filter)
                .into_rgba8();
            clear_transparent(&mut rgba);
        }

        tracing::debug!(
            src_width = src_w,
            src_height = src_h,
            width = self.width,
            height = self.height,
            "Decoded upload"
        );

        Ok(RasterImage::new(rgba.width(), rgba.height(), rgba.into_raw())?)
    }

    /// Decode a base64 payload, bare or as a `data:image/...;base64,` URL.
    pub fn decode_base64(&self, payload: &str) -> Result<RasterImage, ApiError> {
        let encoded = strip_data_url(payload.trim())?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image: {e}")))?;
        self.decode(&bytes)
    }
}

/// Fully transparent pixels read back as transparent black.
fn clear_transparent(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        if px.0[3] == 0 {
            px.0 = [0, 0, 0, 0];
        }
    }
}

fn strip_data_url(payload: &str) -> Result<&str, ApiError> {
    let Some(rest) = payload.strip_prefix("data:") else {
        return Ok(payload);
    };
    match rest.split_once(',') {
        Some((meta, data)) if meta.ends_with(";base64") => Ok(data),
        _ => Err(ApiError::BadRequest(
            "Only base64 data URLs are supported".to_string(),
        )),
    }
}
