//! Test fixtures: generated images and request bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::io::Cursor;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

fn encode(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode fixture PNG");
    out.into_inner()
}

/// A PNG filled with one color
pub fn solid_png(width: u32, height: u32, [r, g, b]: [u8; 3]) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])))
}

/// A canvas-sized PNG whose left half is `left` and right half is `right`
pub fn split_png(left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    let img = RgbaImage::from_fn(400, 600, |x, _| {
        let [r, g, b] = if x < 200 { left } else { right };
        Rgba([r, g, b, 255])
    });
    encode(&img)
}

pub fn base64_png(png: &[u8]) -> String {
    STANDARD.encode(png)
}

pub fn data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Request body for `POST /api/runs` with the default palette
pub fn run_body(png: &[u8]) -> Value {
    json!({ "image": base64_png(png) })
}

/// Request body for `POST /api/runs` with an inline palette
pub fn run_body_with_colors(png: &[u8], colors: &[&str], threshold: u8) -> Value {
    json!({
        "image": data_url(png),
        "colors": colors,
        "threshold": threshold,
    })
}

/// A PNG whose every pixel is `color` at zero alpha
pub fn transparent_png(width: u32, height: u32, [r, g, b]: [u8; 3]) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0])))
}
