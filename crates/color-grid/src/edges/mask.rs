//! Binary edge mask output.

use crate::color::Rgb;

/// Black-on-white RGBA mask with the dimensions of its source image.
///
/// Every pixel is either `(0, 0, 0, 255)` (edge) or `(255, 255, 255, 255)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl EdgeMask {
    pub(crate) fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            rgba,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.rgba
    }

    /// True when `(x, y)` is an edge pixel. Panics when out of bounds.
    #[inline]
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height);
        self.rgba[(y as usize * self.width as usize + x as usize) * 4] == 0
    }

    /// Color at `(x, y)`: black for edges, white otherwise.
    pub fn color(&self, x: u32, y: u32) -> Rgb {
        if self.is_edge(x, y) {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }

    /// Number of edge pixels.
    pub fn edge_count(&self) -> usize {
        self.rgba.chunks_exact(4).filter(|p| p[0] == 0).count()
    }
}
