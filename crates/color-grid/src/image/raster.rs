//! RasterImage: validated, read-only RGBA8 buffer.

use std::sync::Arc;

use super::error::ImageError;
use crate::color::Rgb;

/// A rectangular RGBA8 image in row-major order.
///
/// The pixel data is shared behind an `Arc`, so cloning is cheap and the
/// sampler and edge detector can read the same buffer from different
/// threads. There is no way to mutate pixels after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl RasterImage {
    /// Wrap an RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// - [`ImageError::ZeroDimension`] if either dimension is zero
    /// - [`ImageError::BufferLength`] if `rgba.len() != width * height * 4`
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: rgba.into(),
        })
    }

    /// An opaque image filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, ImageError> {
        let pixels = width as usize * height as usize;
        let mut rgba = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            rgba.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
        Self::new(width, height, rgba)
    }

    /// Build an opaque image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Rgb,
    ) -> Result<Self, ImageError> {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                rgba.extend_from_slice(&[c.r, c.g, c.b, 255]);
            }
        }
        Self::new(width, height, rgba)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Color at `(x, y)` with alpha dropped. Panics when out of bounds.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_rgba(self.pixel(x, y))
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimension() {
        assert_eq!(
            RasterImage::new(0, 10, vec![]),
            Err(ImageError::ZeroDimension {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert_eq!(
            RasterImage::new(2, 2, vec![0; 15]),
            Err(ImageError::BufferLength {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_pixel_access_row_major() {
        let img = RasterImage::from_fn(3, 2, |x, y| Rgb::new(x as u8, y as u8, 7)).unwrap();
        assert_eq!(img.pixel(2, 1), [2, 1, 7, 255]);
        assert_eq!(img.rgb(1, 0), Rgb::new(1, 0, 7));
        assert_eq!(img.as_raw().len(), 24);
    }

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(4, 5, Rgb::new(9, 8, 7)).unwrap();
        assert_eq!((img.width(), img.height()), (4, 5));
        assert!(img.as_raw().chunks_exact(4).all(|p| p == [9, 8, 7, 255]));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_panics() {
        let img = RasterImage::filled(2, 2, Rgb::BLACK).unwrap();
        img.pixel(2, 0);
    }
}
