//! Integration tests for SVG, PNG and legend exports.

mod common;

use axum::http::StatusCode;
use common::fixtures::{self, BLACK, BLUE, RED, WHITE};
use common::{assert_error, assert_ok, assert_png, assert_svg, decode_png, TestApp};
use pretty_assertions::assert_eq;

async fn split_run(app: &TestApp) -> String {
    let png = fixtures::split_png(RED, BLUE);
    app.create_run(&fixtures::run_body(&png)).await
}

#[tokio::test]
async fn test_colored_svg() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let svg = assert_svg(&app.get(&format!("/api/runs/{id}/grid.svg")).await);
    assert!(svg.contains(r#"width="400" height="600""#));
    assert!(svg.contains(r#"fill="black""#));
    assert_eq!(svg.matches("<circle").count(), 2080);
    assert_eq!(svg.matches(r##"fill="#ff0000""##).count(), 1040);
    assert_eq!(svg.matches(r##"fill="#0000ff""##).count(), 1040);
    assert!(svg.contains("<title>X1, Y1 - rgb(255,0,0)</title>"));
}

#[tokio::test]
async fn test_numbered_svg() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let svg = assert_svg(
        &app.get(&format!("/api/runs/{id}/grid.svg?variant=numbered"))
            .await,
    );
    assert_eq!(svg.matches("<text").count(), 2080);
    assert!(svg.contains(r#"font-size="5""#));
    assert!(svg.contains("<title>X1, Y1 - rgb(255,0,0) = 1</title>"));
    assert!(svg.contains("<title>X40, Y52 - rgb(0,0,255) = 2</title>"));
}

#[tokio::test]
async fn test_outline_svg_keeps_one_color() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let svg = assert_svg(
        &app.get(&format!(
            "/api/runs/{id}/grid.svg?variant=outline&color=%230000ff"
        ))
        .await,
    );
    assert!(svg.contains(r#"<g id="svg-rgb_0_0_255_">"#));
    assert_eq!(svg.matches("<circle").count(), 1040);
    assert!(!svg.contains("rgb(255,0,0)"));
}

#[tokio::test]
async fn test_svg_rejects_bad_variant() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let response = app
        .get(&format!("/api/runs/{id}/grid.svg?variant=sparkly"))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .get(&format!("/api/runs/{id}/grid.svg?variant=outline"))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grid_png() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let response = app.get(&format!("/api/runs/{id}/grid.png")).await;
    assert_png(&response);
    let (w, h, _) = decode_png(&response.body);
    assert_eq!((w, h), (400, 600));

    let response = app.get(&format!("/api/runs/{id}/grid.png?scale=2")).await;
    assert_png(&response);
    let (w, h, _) = decode_png(&response.body);
    assert_eq!((w, h), (800, 1200));
}

#[tokio::test]
async fn test_edges_png_matches_canvas() {
    let app = TestApp::new();
    let png = fixtures::split_png(BLACK, WHITE);
    let id = app.create_run(&fixtures::run_body(&png)).await;

    let response = app.get(&format!("/api/runs/{id}/edges.png")).await;
    assert_png(&response);
    let (w, h, rgba) = decode_png(&response.body);
    assert_eq!((w, h), (400, 600));

    let at = |x: usize, y: usize| &rgba[(y * 400 + x) * 4..(y * 400 + x) * 4 + 4];
    assert_eq!(at(199, 300), &[0, 0, 0, 255]);
    assert_eq!(at(200, 300), &[0, 0, 0, 255]);
    assert_eq!(at(100, 300), &[255, 255, 255, 255]);
    assert_eq!(at(0, 0), &[255, 255, 255, 255]);
}

#[tokio::test]
async fn test_legend() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let response = app.get(&format!("/api/runs/{id}/legend")).await;
    assert_ok(&response);
    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );
    let text = response.text();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("#1 rgb(255,0,0) (Red) - 1040"));
    assert_eq!(lines.next(), Some("#2 rgb(0,0,255) (Blue) - 1040"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("X1Y1 = rgb(255,0,0)"));
    assert_eq!(text.lines().count(), 2 + 1 + 2080);
}

#[tokio::test]
async fn test_legend_for_one_color() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    let response = app
        .get(&format!("/api/runs/{id}/legend?color=rgb(0,0,255)"))
        .await;
    assert_ok(&response);
    let text = response.text();
    assert!(text.starts_with("#2 rgb(0,0,255) (Blue) - 1040\n\n"));
    assert_eq!(text.lines().count(), 2 + 1040);
    assert!(text.lines().skip(2).all(|l| l.ends_with("= rgb(0,0,255)")));

    // Palette color that no dot uses
    let response = app
        .get(&format!("/api/runs/{id}/legend?color=%2300ff00"))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let response = app.get(&format!("/api/runs/{id}/legend?color=teal")).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_artifacts_of_unknown_run() {
    let app = TestApp::new();
    for path in ["edges.png", "grid.svg", "grid.png", "legend"] {
        let response = app.get(&format!("/api/runs/missing/{path}")).await;
        assert_error(&response, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_png_rejects_invalid_scale() {
    let app = TestApp::new();
    let id = split_run(&app).await;

    for scale in ["NaN", "inf", "0", "-1"] {
        let response = app
            .get(&format!("/api/runs/{id}/grid.png?scale={scale}"))
            .await;
        let json = assert_error(&response, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("scale"));
    }
}
