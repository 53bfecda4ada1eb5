//! 8-bit RGB color with hex/`rgb()` parsing and Euclidean distance.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An opaque 8-bit sRGB color.
///
/// No gamma handling is applied anywhere: distances are computed directly on
/// the stored channel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from the first three bytes of an RGBA pixel.
    #[inline]
    pub fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Exact integer arithmetic, so ties between palette entries compare
    /// equal and ordering is stable.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance `sqrt((r1-r2)² + (g1-g2)² + (b1-b2)²)`.
    #[inline]
    pub fn distance(self, other: Rgb) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The display form with every non-alphanumeric character replaced by
    /// `_`, e.g. `rgb_255_0_0_`. Usable as an SVG id or a file name.
    pub fn css_id(self) -> String {
        self.to_string()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from one of:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (each digit doubled)
    /// - `rgb(r,g,b)` with decimal channels, whitespace allowed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(body) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            return parse_rgb_function(body);
        }

        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        let digits = s
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ParseColorError::InvalidHex(c)))
            .collect::<Result<Vec<u8>, _>>()?;
        match digits[..] {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

fn parse_rgb_function(body: &str) -> Result<Rgb, ParseColorError> {
    let mut channels = [0u8; 3];
    let mut parts = body.split(',');
    for channel in channels.iter_mut() {
        let part = parts.next().ok_or(ParseColorError::InvalidRgb)?;
        let part = part.trim();
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseColorError::InvalidRgb);
        }
        *channel = part.parse().map_err(|_| ParseColorError::InvalidRgb)?;
    }
    if parts.next().is_some() {
        return Err(ParseColorError::InvalidRgb);
    }
    Ok(Rgb::from(channels))
}
