//! Palette types and nearest-color classification.
//!
//! This module provides the ordered reference palette a sampled region is
//! classified against, plus error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{closest_color, Palette, PaletteEntry};
