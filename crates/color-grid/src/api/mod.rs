//! High-level pipeline API: [`GridPipeline`] and the unified [`GridError`].

mod error;
mod pipeline;

pub use error::GridError;
pub use pipeline::{GridPipeline, PipelineOutput, DEFAULT_THRESHOLD};
