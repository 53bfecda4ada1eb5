//! Unified error type for the color-grid public API.

use crate::image::ImageError;
use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Every failure the crate reports is an invalid input: a bad palette, a
/// bad color string or a malformed pixel buffer. No partial results are
/// produced when one occurs.
///
/// # Example
///
/// ```
/// use color_grid::{GridError, Palette};
///
/// fn palette() -> Result<Palette, GridError> {
///     Ok(Palette::from_hex(&["#000000", "#FFFFFF"])?)
/// }
/// # palette().unwrap();
/// ```
#[derive(Debug)]
pub enum GridError {
    Palette(PaletteError),
    ParseColor(ParseColorError),
    Image(ImageError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Palette(err) => write!(f, "invalid input: {}", err),
            GridError::ParseColor(err) => write!(f, "invalid input: {}", err),
            GridError::Image(err) => write!(f, "invalid input: {}", err),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Palette(err) => Some(err),
            GridError::ParseColor(err) => Some(err),
            GridError::Image(err) => Some(err),
        }
    }
}

impl From<PaletteError> for GridError {
    fn from(err: PaletteError) -> Self {
        GridError::Palette(err)
    }
}

impl From<ParseColorError> for GridError {
    fn from(err: ParseColorError) -> Self {
        GridError::ParseColor(err)
    }
}

impl From<ImageError> for GridError {
    fn from(err: ImageError) -> Self {
        GridError::Image(err)
    }
}
