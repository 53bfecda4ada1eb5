//! Serializable summaries of a pipeline run.

use color_grid::{ColorGrid, EdgeMask};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One color of the summary, in legend order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ColorCountEntry {
    /// Display form, e.g. `rgb(255,0,0)`
    #[schema(example = "rgb(255,0,0)")]
    pub color: String,
    #[schema(example = "#ff0000")]
    pub hex: String,
    /// Palette entry name
    pub name: String,
    /// 1-based legend number (first appearance order)
    pub number: usize,
    pub count: usize,
}

/// One classified dot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CellEntry {
    /// 1-based coordinate label, e.g. `X1Y1`
    #[schema(example = "X1Y1")]
    pub coords: String,
    /// 0-based column
    pub column: u32,
    /// 0-based row
    pub row: u32,
    /// Classified color, display form
    pub color: String,
}

/// Everything a client needs to draw or tabulate a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GridReport {
    /// Edge threshold the mask was computed with
    pub threshold: u8,
    /// Name of the palette used
    pub palette: String,
    /// Number of classified dots
    pub cell_count: usize,
    /// Dots with no pixels under them
    pub skipped: usize,
    /// Number of black pixels in the edge mask
    pub edge_pixels: usize,
    pub counts: Vec<ColorCountEntry>,
    pub cells: Vec<CellEntry>,
}

impl GridReport {
    pub fn new(palette: &str, threshold: u8, grid: &ColorGrid, edges: &EdgeMask) -> Self {
        Self {
            threshold,
            palette: palette.to_string(),
            cell_count: grid.len(),
            skipped: grid.skipped().len(),
            edge_pixels: edges.edge_count(),
            counts: grid
                .counts()
                .iter()
                .map(|c| ColorCountEntry {
                    color: c.color.to_string(),
                    hex: c.color.to_hex(),
                    name: c.name.clone(),
                    number: c.number,
                    count: c.count,
                })
                .collect(),
            cells: grid
                .cells()
                .iter()
                .map(|c| CellEntry {
                    coords: c.cell.label(),
                    column: c.cell.column,
                    row: c.cell.row,
                    color: c.color.to_string(),
                })
                .collect(),
        }
    }
}
