pub mod artifacts;
pub mod palettes;
pub mod runs;

pub use artifacts::{handle_edges_png, handle_grid_png, handle_grid_svg, handle_legend};
pub use artifacts::{
    __path_handle_edges_png, __path_handle_grid_png, __path_handle_grid_svg, __path_handle_legend,
};
pub use palettes::{handle_list_palettes, PaletteColor, PaletteInfo, __path_handle_list_palettes};
pub use runs::{handle_create_run, handle_get_run, handle_update_threshold};
pub use runs::{
    CreateRunRequest, RunResponse, ThresholdRequest, __path_handle_create_run,
    __path_handle_get_run, __path_handle_update_threshold,
};
