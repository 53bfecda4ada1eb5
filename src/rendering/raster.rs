//! PNG output: SVG rasterization and edge-mask encoding.

use crate::error::RenderError;
use color_grid::EdgeMask;
use resvg::usvg::{self, fontdb, Transform};
use std::io::Cursor;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Largest accepted rasterization scale factor
pub const MAX_SCALE: f32 = 8.0;

/// Rasterizes dot-grid SVGs to PNG.
pub struct SvgRasterizer {
    /// Font database for the numbered variant's labels
    fontdb: Arc<fontdb::Database>,
}

impl SvgRasterizer {
    /// Create a rasterizer using the system fonts
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for SVG text rendering"
        );

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Render SVG to an RGBA PNG, `scale` times its intrinsic size, on white.
    pub fn render_png(&self, svg_data: &[u8], scale: f32) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg_data, scale)?;
        encode_rgba_png(pixmap.width(), pixmap.height(), pixmap.data())
    }

    /// Parse and rasterize SVG to an RGBA pixmap
    fn rasterize_svg(&self, svg_data: &[u8], scale: f32) -> Result<Pixmap, RenderError> {
        let scale = if scale.is_finite() {
            scale.clamp(0.1, MAX_SCALE)
        } else {
            1.0
        };
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        tracing::debug!(width, height, scale, "Rasterized SVG");
        Ok(pixmap)
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an edge mask as an RGBA PNG of the mask's size.
pub fn edge_mask_png(mask: &EdgeMask) -> Result<Vec<u8>, RenderError> {
    encode_rgba_png(mask.width(), mask.height(), mask.as_raw())
}

/// Encode 8-bit RGBA pixel data as a PNG.
///
/// Pixels must be fully opaque or already straight (non-premultiplied).
pub fn encode_rgba_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
