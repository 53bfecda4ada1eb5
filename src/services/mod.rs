pub mod image_decoder;
pub mod palette_store;
pub mod processing;
pub mod run_store;

pub use image_decoder::ImageDecoder;
pub use palette_store::{palette_from_config, ConfigPalettes, PaletteProvider, INLINE_PALETTE};
pub use processing::{ProcessingService, RunOutput};
pub use run_store::{CommitOutcome, RunRecord, RunStore, RunTicket};
