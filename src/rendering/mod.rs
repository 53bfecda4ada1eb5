pub mod legend;
pub mod raster;
pub mod svg;

pub use legend::{color_legend_text, legend_text};
pub use raster::{edge_mask_png, encode_rgba_png, SvgRasterizer};
pub use svg::{render_svg, SvgVariant};
