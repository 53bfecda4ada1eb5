//! Color value type shared by the sampler, classifier and renderers.
//!
//! [`Rgb`] is a plain 8-bit triple. It is `Eq + Hash + Ord` so it can be
//! used directly as a map key when counting classified cells; the
//! `rgb(r,g,b)` string form is only produced for display.
//!
//! # Example
//!
//! ```
//! use color_grid::Rgb;
//!
//! let red: Rgb = "#ff0000".parse().unwrap();
//! assert_eq!(red, Rgb::new(255, 0, 0));
//! assert_eq!(red.to_string(), "rgb(255,0,0)");
//! ```

mod rgb;

pub use rgb::Rgb;
