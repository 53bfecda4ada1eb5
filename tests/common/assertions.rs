//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(response.header("content-type"), Some("image/png"));
}

/// Assert response is an SVG document and return its text
pub fn assert_svg(response: &TestResponse) -> String {
    assert_ok(response);
    assert_eq!(response.header("content-type"), Some("image/svg+xml"));
    let text = response.text();
    assert!(text.starts_with("<svg"), "Expected SVG, got: {}", &text[..40.min(text.len())]);
    assert!(text.trim_end().ends_with("</svg>"));
    text
}

/// Assert an error body with the given status and return it
pub fn assert_error(response: &TestResponse, expected: StatusCode) -> serde_json::Value {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert!(json["error"].is_string(), "Expected error message: {json}");
    json
}

/// Decode a PNG body into (width, height, rgba)
pub fn decode_png(body: &[u8]) -> (u32, u32, Vec<u8>) {
    let img = image::load_from_memory(body)
        .expect("Failed to decode PNG")
        .into_rgba8();
    (img.width(), img.height(), img.into_raw())
}
