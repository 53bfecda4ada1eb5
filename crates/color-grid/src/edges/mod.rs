//! Two-pass Sobel edge mask.
//!
//! Each kernel is applied in its own pass that thresholds a per-pixel
//! gradient magnitude into black/white. The two pass buffers are then
//! combined pixel by pixel: where they disagree strongly enough the output
//! is black (edge), otherwise white.
//!
//! Within one pass the "x" and "y" channel accumulators are fed from the
//! same weighted sum, so a pass's magnitude is `sqrt(2 * (r² + g² + b²))`
//! of its kernel response, not `sqrt(gx² + gy²)`.

mod detector;
mod kernel;
mod mask;

pub use detector::detect_edges;
pub use kernel::{apply_kernel, Kernel, SOBEL_X, SOBEL_Y};
pub use mask::EdgeMask;
