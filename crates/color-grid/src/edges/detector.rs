use super::kernel::{apply_kernel, SOBEL_X, SOBEL_Y};
use super::mask::EdgeMask;
use crate::image::RasterImage;

/// Compute the edge mask of `image` at `threshold`.
///
/// Both kernel passes use the same threshold, then every pixel (borders
/// included) is set black when the per-channel difference between the
/// passes has magnitude above `threshold`. Border pixels are unset in both
/// passes and therefore always come out white.
pub fn detect_edges(image: &RasterImage, threshold: u8) -> EdgeMask {
    let pass_x = apply_kernel(image, &SOBEL_X, threshold);
    let pass_y = apply_kernel(image, &SOBEL_Y, threshold);
    let threshold = threshold as f64;

    let mut out = vec![0u8; pass_x.len()];
    for ((dst, a), b) in out
        .chunks_exact_mut(4)
        .zip(pass_x.chunks_exact(4))
        .zip(pass_y.chunks_exact(4))
    {
        let dr = a[0] as f64 - b[0] as f64;
        let dg = a[1] as f64 - b[1] as f64;
        let db = a[2] as f64 - b[2] as f64;
        let magnitude = (dr * dr + dg * dg + db * db).sqrt();
        let value = if magnitude > threshold { 0 } else { 255 };
        dst.copy_from_slice(&[value, value, value, 255]);
    }

    EdgeMask::new(image.width(), image.height(), out)
}
