//! Immutable RGBA pixel buffer consumed by both pipelines.

mod error;
mod raster;

pub use error::ImageError;
pub use raster::RasterImage;
