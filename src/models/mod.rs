pub mod config;
pub mod report;

pub use config::{
    AppConfig, EdgeConfig, LimitsConfig, PaletteColorConfig, ResampleFilter, SamplingConfig,
};
pub use report::{CellEntry, ColorCountEntry, GridReport};
