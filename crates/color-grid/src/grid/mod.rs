//! Staggered circular-sample grid.
//!
//! [`GridSpec`] fixes the lattice geometry; [`sample`] walks every
//! [`GridCell`] in column-major order and averages the pixels inside its
//! circular footprint.
//!
//! # Geometry
//!
//! Columns are placed at a pitch of `diameter + x_spacing` and the whole
//! lattice is centered horizontally on the canvas. Rows are placed at a
//! pitch of `diameter + y_spacing`. Even columns start one diameter from
//! the top, odd columns one radius, which staggers neighbouring columns by
//! half a dot.

mod sampler;
mod spec;

pub use sampler::{sample, CellSample};
pub use spec::{GridCell, GridSpec};
