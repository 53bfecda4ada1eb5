use std::fmt;

/// Error type for constructing a [`RasterImage`](super::RasterImage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Width or height is zero
    ZeroDimension { width: u32, height: u32 },
    /// Pixel buffer is not `width * height * 4` bytes long
    BufferLength { expected: usize, actual: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::ZeroDimension { width, height } => {
                write!(f, "image has zero dimension ({}x{})", width, height)
            }
            ImageError::BufferLength { expected, actual } => {
                write!(
                    f,
                    "pixel buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for ImageError {}
