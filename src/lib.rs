//! Dotgrid - turn images into color dot grids
//!
//! HTTP server and CLI around the `color-grid` pipeline.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
