//! Plain-text color legends.
//!
//! The full legend starts with one header line per color in legend order
//! (`#n rgb(r,g,b) (Name) - count`), then a blank line, then one
//! `X{c}Y{r} = rgb(r,g,b)` line per dot in sampling order.

use color_grid::{ColorGrid, Rgb};

pub fn legend_text(grid: &ColorGrid) -> String {
    let mut out = String::new();
    for c in grid.counts() {
        out.push_str(&format!("#{} {} ({}) - {}\n", c.number, c.color, c.name, c.count));
    }
    out.push('\n');
    for c in grid.cells() {
        out.push_str(&format!("{} = {}\n", c.cell.label(), c.color));
    }
    out
}

/// Legend restricted to one color; `None` if no dot has that color.
pub fn color_legend_text(grid: &ColorGrid, color: Rgb) -> Option<String> {
    let entry = grid.counts().iter().find(|c| c.color == color)?;
    let mut out = format!(
        "#{} {} ({}) - {}\n\n",
        entry.number, entry.color, entry.name, entry.count
    );
    for c in grid.cells_with(color) {
        out.push_str(&format!("{} = {}\n", c.cell.label(), c.color));
    }
    Some(out)
}
