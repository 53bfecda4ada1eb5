//! GridPipeline builder -- the primary entry point for the crate.

use crate::edges::{detect_edges, EdgeMask};
use crate::grid::{sample, GridSpec};
use crate::image::RasterImage;
use crate::output::ColorGrid;
use crate::palette::Palette;

/// Default edge threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Runs quantization and edge detection over images.
///
/// The constructor requires a [`Palette`], so an empty palette can never
/// reach the classifier. Configuration methods consume and return `self`;
/// the run methods take `&self` so one pipeline can process many images.
///
/// # Example
///
/// ```
/// use color_grid::{GridPipeline, Palette, RasterImage, Rgb};
///
/// let palette = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap();
/// let image = RasterImage::filled(400, 600, Rgb::new(250, 5, 5)).unwrap();
///
/// let out = GridPipeline::new(palette).threshold(100).recompute(&image);
/// assert_eq!(out.grid.len(), 2080);
/// assert_eq!(out.edges.edge_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GridPipeline {
    palette: Palette,
    spec: GridSpec,
    threshold: u8,
}

/// Both artifacts of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub grid: ColorGrid,
    pub edges: EdgeMask,
}

impl GridPipeline {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            spec: GridSpec::STANDARD,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the grid geometry.
    #[inline]
    pub fn grid_spec(mut self, spec: GridSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Set the edge threshold (0..=255).
    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sample and classify `image`.
    pub fn quantize(&self, image: &RasterImage) -> ColorGrid {
        let samples = sample(image, &self.spec);
        ColorGrid::classify(&samples, &self.palette)
    }

    /// Edge mask of `image` at the configured threshold.
    pub fn edges(&self, image: &RasterImage) -> EdgeMask {
        detect_edges(image, self.threshold)
    }

    /// Run both pipelines sequentially.
    pub fn recompute(&self, image: &RasterImage) -> PipelineOutput {
        PipelineOutput {
            grid: self.quantize(image),
            edges: self.edges(image),
        }
    }
}
