//! Output types for the quantization pipeline.
//!
//! [`ColorGrid`] holds the classified cells in sampling order together with
//! a per-color summary whose order (and therefore legend numbering) follows
//! first appearance while walking the grid.

mod color_grid;

pub use color_grid::{ClassifiedCell, ColorCount, ColorGrid};
