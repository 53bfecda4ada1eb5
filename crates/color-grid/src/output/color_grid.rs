//! ColorGrid: classified samples with first-appearance color summary.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::grid::{CellSample, GridCell};
use crate::palette::Palette;

/// A grid cell together with its average and the palette color it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCell {
    pub cell: GridCell,
    pub average: Rgb,
    pub palette_index: usize,
    pub color: Rgb,
}

/// How many cells were classified to one palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Rgb,
    /// Palette entry name
    pub name: String,
    /// 1-based legend number, in order of first appearance
    pub number: usize,
    pub count: usize,
}

/// Result of classifying a full set of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    cells: Vec<ClassifiedCell>,
    skipped: Vec<GridCell>,
    counts: Vec<ColorCount>,
}

impl ColorGrid {
    /// Classify `samples` against `palette`.
    ///
    /// Degenerate samples (no average) are not classified; their cells are
    /// listed in [`skipped()`](Self::skipped) instead.
    pub fn classify(samples: &[CellSample], palette: &Palette) -> Self {
        let mut cells = Vec::with_capacity(samples.len());
        let mut skipped = Vec::new();
        let mut counts: Vec<ColorCount> = Vec::new();
        let mut slot: HashMap<Rgb, usize> = HashMap::new();

        for sample in samples {
            let Some(average) = sample.average else {
                skipped.push(sample.cell);
                continue;
            };
            let (palette_index, _) = palette.find_nearest(average);
            let color = palette.color(palette_index);

            match slot.get(&color) {
                Some(&i) => counts[i].count += 1,
                None => {
                    slot.insert(color, counts.len());
                    counts.push(ColorCount {
                        color,
                        name: palette.name(palette_index).to_string(),
                        number: counts.len() + 1,
                        count: 1,
                    });
                }
            }

            cells.push(ClassifiedCell {
                cell: sample.cell,
                average,
                palette_index,
                color,
            });
        }

        Self {
            cells,
            skipped,
            counts,
        }
    }

    /// Classified cells in sampling (column-major) order.
    #[inline]
    pub fn cells(&self) -> &[ClassifiedCell] {
        &self.cells
    }

    /// Cells that had no in-bounds pixels.
    #[inline]
    pub fn skipped(&self) -> &[GridCell] {
        &self.skipped
    }

    /// Per-color counts in first-appearance order.
    #[inline]
    pub fn counts(&self) -> &[ColorCount] {
        &self.counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn count_by_color(&self) -> HashMap<Rgb, usize> {
        self.counts.iter().map(|c| (c.color, c.count)).collect()
    }

    /// Legend number of `color`, if any cell was classified to it.
    pub fn number_of(&self, color: Rgb) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.color == color)
            .map(|c| c.number)
    }

    pub fn cells_with(&self, color: Rgb) -> impl Iterator<Item = &ClassifiedCell> + '_ {
        self.cells.iter().filter(move |c| c.color == color)
    }
}
