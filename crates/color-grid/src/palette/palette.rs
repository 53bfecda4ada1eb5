//! Ordered palette of named colors with nearest-color matching.

use super::error::PaletteError;
use crate::color::Rgb;

/// One named reference color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub color: Rgb,
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// An ordered, non-empty set of reference colors.
///
/// Order is significant: when two entries are equally close to a sample the
/// earlier one wins. Duplicate colors are allowed; the later duplicate is
/// simply never selected.
///
/// # Example
///
/// ```
/// use color_grid::{Palette, Rgb};
///
/// let palette = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap();
/// let (idx, _) = palette.find_nearest(Rgb::new(200, 10, 40));
/// assert_eq!(idx, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette from named entries.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] if `entries` is empty.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { entries })
    }

    /// Create a palette from bare colors, naming each entry by its hex form.
    pub fn from_colors(colors: &[Rgb]) -> Result<Self, PaletteError> {
        Self::new(
            colors
                .iter()
                .map(|&c| PaletteEntry::new(c.to_hex(), c))
                .collect(),
        )
    }

    /// Create a palette from `(name, color string)` pairs.
    ///
    /// Color strings accept every form [`Rgb`]'s `FromStr` does.
    pub fn from_named<N, V>(pairs: &[(N, V)]) -> Result<Self, PaletteError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = Vec::with_capacity(pairs.len());
        for (name, value) in pairs {
            let color = value
                .as_ref()
                .parse::<Rgb>()
                .map_err(|source| PaletteError::ParseColor {
                    name: name.as_ref().to_string(),
                    source,
                })?;
            entries.push(PaletteEntry::new(name.as_ref(), color));
        }
        Self::new(entries)
    }

    /// Create a palette from hex strings, naming each entry by its input.
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let pairs: Vec<(&str, &str)> = hex.iter().map(|&h| (h, h)).collect();
        Self::from_named(&pairs)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Color of entry `idx`. Panics if out of range.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.entries[idx].color
    }

    /// Name of entry `idx`. Panics if out of range.
    #[inline]
    pub fn name(&self, idx: usize) -> &str {
        &self.entries[idx].name
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.entries.iter().map(|e| e.color).collect()
    }

    /// Name of the first entry carrying `color`, if any.
    pub fn name_of(&self, color: Rgb) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.color == color)
            .map(|e| e.name.as_str())
    }

    /// Find the palette entry closest to `color` by Euclidean RGB distance.
    ///
    /// Returns `(index, distance)`. The scan keeps the first strictly
    /// smaller distance, so ties resolve to the lowest index.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> (usize, f64) {
        let (idx, dist_sq) = nearest_index(color, self.entries.iter().map(|e| e.color))
            .unwrap_or((0, u32::MAX));
        (idx, (dist_sq as f64).sqrt())
    }
}

fn nearest_index(color: Rgb, candidates: impl Iterator<Item = Rgb>) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (i, candidate) in candidates.enumerate() {
        let dist = color.distance_squared(candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best
}

/// Return the member of `palette` closest to `sample`.
///
/// Ties go to the first occurrence.
///
/// # Errors
///
/// [`PaletteError::EmptyPalette`] when `palette` is empty.
pub fn closest_color(sample: Rgb, palette: &[Rgb]) -> Result<Rgb, PaletteError> {
    nearest_index(sample, palette.iter().copied())
        .map(|(idx, _)| palette[idx])
        .ok_or(PaletteError::EmptyPalette)
}
