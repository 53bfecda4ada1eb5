//! Grid geometry and cell placement.

/// Fixed lattice geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Circle diameter in pixels
    pub diameter: f64,
    /// Extra horizontal gap between columns (may be negative)
    pub x_spacing: f64,
    /// Extra vertical gap between rows
    pub y_spacing: f64,
}

impl GridSpec {
    /// 40×52 dots of diameter 10 on a 400×600 canvas.
    pub const STANDARD: GridSpec = GridSpec {
        columns: 40,
        rows: 52,
        canvas_width: 400,
        canvas_height: 600,
        diameter: 10.0,
        x_spacing: -0.075,
        y_spacing: 1.45,
    };

    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Horizontal margin that centers the lattice on the canvas.
    pub fn center_offset(&self) -> f64 {
        let columns = self.columns as f64;
        (self.canvas_width as f64 - (columns * self.diameter + columns * self.x_spacing)) / 2.0
    }

    /// Geometry of the cell at (`column`, `row`), both 0-based.
    pub fn cell(&self, column: u32, row: u32) -> GridCell {
        let x = column as f64;
        let y = row as f64;
        let stagger = if column % 2 == 0 {
            self.diameter
        } else {
            self.radius()
        };
        GridCell {
            column,
            row,
            center_x: self.radius() + self.center_offset() + x * self.diameter + x * self.x_spacing,
            center_y: stagger + y * self.diameter + y * self.y_spacing,
            radius: self.radius(),
        }
    }

    /// All cells, column-major (column outer, row inner).
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.columns).flat_map(move |c| (0..self.rows).map(move |r| self.cell(c, r)))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One lattice position and its circular sampling footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// 0-based column
    pub column: u32,
    /// 0-based row
    pub row: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl GridCell {
    /// 1-based coordinate label, e.g. `X1Y1` for the top-left cell.
    pub fn label(&self) -> String {
        format!("X{}Y{}", self.column + 1, self.row + 1)
    }
}
