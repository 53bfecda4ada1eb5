//! color-grid: dot-grid color quantization and Sobel edge masks
//!
//! Given an RGBA image drawn onto a fixed canvas, this library samples a
//! staggered lattice of circular regions, averages the pixels inside each
//! one and maps every average to the nearest entry of a palette. A second,
//! independent pipeline turns the same image into a black-on-white edge
//! mask.
//!
//! # Quick Start
//!
//! ```
//! use color_grid::{GridPipeline, Palette, RasterImage, Rgb};
//!
//! let palette = Palette::from_hex(&["#ff0000", "#0000ff"]).unwrap();
//! let image = RasterImage::filled(400, 600, Rgb::new(255, 0, 0)).unwrap();
//!
//! let output = GridPipeline::new(palette).recompute(&image);
//! assert_eq!(output.grid.counts()[0].count, 2080);
//! ```
//!
//! # Pieces
//!
//! - [`sample`] and [`GridSpec`]: lattice geometry and circular averaging
//! - [`Palette::find_nearest`] and [`closest_color`]: Euclidean RGB
//!   classification with first-entry tie breaking
//! - [`detect_edges`]: two-pass Sobel mask
//! - [`ColorGrid`]: classified cells plus first-appearance color counts
//!
//! The library does not decode or resize images. Callers are expected to
//! draw their input onto a canvas of [`GridSpec::canvas_width`] ×
//! [`GridSpec::canvas_height`] first.

pub mod api;
pub mod color;
pub mod edges;
pub mod grid;
pub mod image;
pub mod output;
pub mod palette;


pub use api::{GridError, GridPipeline, PipelineOutput, DEFAULT_THRESHOLD};
pub use color::Rgb;
pub use edges::{apply_kernel, detect_edges, EdgeMask, Kernel, SOBEL_X, SOBEL_Y};
pub use grid::{sample, CellSample, GridCell, GridSpec};
pub use image::{ImageError, RasterImage};
pub use output::{ClassifiedCell, ColorCount, ColorGrid};
pub use palette::{closest_color, Palette, PaletteEntry, PaletteError, ParseColorError};
