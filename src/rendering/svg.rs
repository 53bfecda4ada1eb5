//! Dot-grid SVG documents.

use color_grid::{ColorGrid, GridSpec, Rgb};
use std::str::FromStr;

/// Which picture of the grid to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgVariant {
    /// Dots filled with their classified color on a black background
    Colored,
    /// White dots carrying their legend number
    Numbered,
    /// Only the dots of one color, as white outlines
    Outline(Rgb),
}

impl SvgVariant {
    /// Build a variant from the `variant` and `color` query parameters.
    pub fn from_parts(variant: Option<&str>, color: Option<&str>) -> Result<Self, String> {
        match variant.unwrap_or("colored") {
            "colored" => Ok(SvgVariant::Colored),
            "numbered" => Ok(SvgVariant::Numbered),
            "outline" => {
                let color = color.ok_or("outline variant requires a color")?;
                Rgb::from_str(color)
                    .map(SvgVariant::Outline)
                    .map_err(|e| format!("invalid color '{color}': {e}"))
            }
            other => Err(format!(
                "unknown variant '{other}' (expected colored, numbered or outline)"
            )),
        }
    }

    /// Short name used in file names, e.g. `outline-rgb_255_0_0_`
    pub fn slug(&self) -> String {
        match self {
            SvgVariant::Colored => "colored".to_string(),
            SvgVariant::Numbered => "numbered".to_string(),
            SvgVariant::Outline(color) => format!("outline-{}", color.css_id()),
        }
    }
}

/// Render `grid` as an SVG document the size of `spec`'s canvas.
pub fn render_svg(grid: &ColorGrid, spec: &GridSpec, variant: SvgVariant) -> String {
    let (w, h) = (spec.canvas_width, spec.canvas_height);
    let mut svg = String::with_capacity(grid.len() * 160 + 256);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    ));
    svg.push('\n');

    match variant {
        SvgVariant::Colored => {
            svg.push_str(&format!(
                r#"<rect width="{w}" height="{h}" fill="black"/>"#
            ));
            svg.push('\n');
            for c in grid.cells() {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"><title>X{}, Y{} - {}</title></circle>"#,
                    num(c.cell.center_x),
                    num(c.cell.center_y),
                    num(c.cell.radius),
                    c.color.to_hex(),
                    c.cell.column + 1,
                    c.cell.row + 1,
                    c.color,
                ));
                svg.push('\n');
            }
        }
        SvgVariant::Numbered => {
            svg.push_str(&format!(
                r#"<rect width="{w}" height="{h}" fill="white"/>"#
            ));
            svg.push('\n');
            for c in grid.cells() {
                let number = grid.number_of(c.color).unwrap_or(0);
                let (cx, cy) = (num(c.cell.center_x), num(c.cell.center_y));
                svg.push_str(&format!(
                    concat!(
                        r#"<g><circle cx="{cx}" cy="{cy}" r="{r}" fill="white" stroke="black" stroke-width="0.1">"#,
                        r#"<title>X{col}, Y{row} - {color} = {n}</title></circle>"#,
                        r#"<text x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="central" "#,
                        r#"font-family="sans-serif" font-size="5" fill="black">{n}</text></g>"#,
                    ),
                    cx = cx,
                    cy = cy,
                    r = num(c.cell.radius),
                    col = c.cell.column + 1,
                    row = c.cell.row + 1,
                    color = c.color,
                    n = number,
                ));
                svg.push('\n');
            }
        }
        SvgVariant::Outline(color) => {
            svg.push_str(&format!(
                r#"<g id="svg-{}">"#,
                color.css_id()
            ));
            svg.push('\n');
            for c in grid.cells_with(color) {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="white" stroke="black" stroke-width="0.1"><title>X{}, Y{} - {}</title></circle>"#,
                    num(c.cell.center_x),
                    num(c.cell.center_y),
                    num(c.cell.radius),
                    c.cell.column + 1,
                    c.cell.row + 1,
                    c.color,
                ));
                svg.push('\n');
            }
            svg.push_str("</g>\n");
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Coordinates with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
