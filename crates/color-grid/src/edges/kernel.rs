//! 3×3 kernels and the single-pass convolution.

use crate::image::RasterImage;

/// 3×3 convolution weights, indexed `[row][column]`.
pub type Kernel = [[i32; 3]; 3];

pub const SOBEL_X: Kernel = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_Y: Kernel = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Run one thresholded kernel pass over `image`.
///
/// Returns an RGBA buffer of the image's size. Interior pixels are 0 where
/// the pass magnitude exceeds `threshold` and 255 elsewhere, with alpha 255.
/// Border pixels are left at zero in all four channels.
pub fn apply_kernel(image: &RasterImage, kernel: &Kernel, threshold: u8) -> Vec<u8> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let data = image.as_raw();
    let mut out = vec![0u8; data.len()];
    let threshold = threshold as f64;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (mut rx, mut gx, mut bx) = (0i64, 0i64, 0i64);
            let (mut ry, mut gy, mut by) = (0i64, 0i64, 0i64);

            for (ky, weights) in kernel.iter().enumerate() {
                for (kx, &weight) in weights.iter().enumerate() {
                    let p = ((y + ky - 1) * width + (x + kx - 1)) * 4;
                    let weight = weight as i64;
                    let (r, g, b) = (data[p] as i64, data[p + 1] as i64, data[p + 2] as i64);

                    rx += r * weight;
                    gx += g * weight;
                    bx += b * weight;

                    ry += r * weight;
                    gy += g * weight;
                    by += b * weight;
                }
            }

            let magnitude =
                ((rx * rx + gx * gx + bx * bx + ry * ry + gy * gy + by * by) as f64).sqrt();
            let value = if magnitude > threshold { 0 } else { 255 };
            let i = (y * width + x) * 4;
            out[i] = value;
            out[i + 1] = value;
            out[i + 2] = value;
            out[i + 3] = 255;
        }
    }

    out
}
