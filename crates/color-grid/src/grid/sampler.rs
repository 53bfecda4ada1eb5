//! Circular-footprint averaging.

use super::spec::{GridCell, GridSpec};
use crate::color::Rgb;
use crate::image::RasterImage;

/// Average color of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSample {
    pub cell: GridCell,
    /// `None` when no footprint pixel fell inside the image.
    pub average: Option<Rgb>,
    /// Number of pixels that contributed to `average`.
    pub pixel_count: u32,
}

impl CellSample {
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.average.is_none()
    }
}

/// Sample every cell of `spec` from `image`.
///
/// The result always holds `spec.cell_count()` entries in column-major
/// order, whatever the image size. Cells whose footprint lies entirely
/// outside the image come back with `average: None`.
pub fn sample(image: &RasterImage, spec: &GridSpec) -> Vec<CellSample> {
    let offsets = footprint(spec.radius());
    spec.cells()
        .map(|cell| sample_cell(image, cell, &offsets))
        .collect()
}

/// Offsets `(i, j)` stepping by one from `-radius` to `+radius` on both
/// axes, kept where `i² + j² <= radius²`.
fn footprint(radius: f64) -> Vec<(f64, f64)> {
    let steps = (2.0 * radius).floor().max(0.0) as u32;
    let r2 = radius * radius;
    let mut offsets = Vec::new();
    for a in 0..=steps {
        let i = -radius + a as f64;
        for b in 0..=steps {
            let j = -radius + b as f64;
            if i * i + j * j <= r2 {
                offsets.push((i, j));
            }
        }
    }
    offsets
}

fn sample_cell(image: &RasterImage, cell: GridCell, offsets: &[(f64, f64)]) -> CellSample {
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    let mut count = 0u32;

    for &(i, j) in offsets {
        let x = round_half_up(cell.center_x + i);
        let y = round_half_up(cell.center_y + j);
        if x < 0.0 || y < 0.0 || x >= image.width() as f64 || y >= image.height() as f64 {
            continue;
        }
        let px = image.rgb(x as u32, y as u32);
        r += px.r as u64;
        g += px.g as u64;
        b += px.b as u64;
        count += 1;
    }

    let average = (count > 0).then(|| {
        let n = count as f64;
        Rgb::new(
            round_half_up(r as f64 / n) as u8,
            round_half_up(g as f64 / n) as u8,
            round_half_up(b as f64 / n) as u8,
        )
    });

    CellSample {
        cell,
        average,
        pixel_count: count,
    }
}

/// Round to nearest, halves toward positive infinity (2.5 -> 3, -2.5 -> -2).
#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
