use crate::error::ApiError;
use color_grid::{ColorGrid, EdgeMask, GridPipeline, GridSpec, Palette, RasterImage};
use std::time::Instant;

/// Result of one processing pass
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub grid: ColorGrid,
    pub edges: EdgeMask,
    pub threshold: u8,
}

/// Runs the grid pipeline off the async executor
#[derive(Debug, Clone)]
pub struct ProcessingService {
    spec: GridSpec,
}

impl ProcessingService {
    pub fn new(spec: GridSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Quantize the image and detect its edges.
    ///
    /// The two passes are independent and run on separate blocking threads.
    pub async fn run(
        &self,
        image: RasterImage,
        palette: Palette,
        threshold: u8,
    ) -> Result<RunOutput, ApiError> {
        let started = Instant::now();
        let pipeline = GridPipeline::new(palette)
            .grid_spec(self.spec)
            .threshold(threshold);

        let grid_task = {
            let pipeline = pipeline.clone();
            let image = image.clone();
            tokio::task::spawn_blocking(move || pipeline.quantize(&image))
        };
        let edge_task = tokio::task::spawn_blocking(move || pipeline.edges(&image));

        let (grid, edges) = tokio::join!(grid_task, edge_task);
        let grid = grid.map_err(|e| ApiError::Internal(format!("Quantization task failed: {e}")))?;
        let edges = edges.map_err(|e| ApiError::Internal(format!("Edge task failed: {e}")))?;

        if !grid.skipped().is_empty() {
            tracing::warn!(
                skipped = grid.skipped().len(),
                "Some grid cells had no pixels inside the image"
            );
        }

        tracing::debug!(
            threshold,
            cells = grid.len(),
            colors = grid.counts().len(),
            edge_pixels = edges.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Processed image"
        );

        Ok(RunOutput {
            grid,
            edges,
            threshold,
        })
    }

    /// Recompute only the edge mask, keeping an existing grid.
    pub async fn edges(&self, image: RasterImage, threshold: u8) -> Result<EdgeMask, ApiError> {
        tokio::task::spawn_blocking(move || color_grid::detect_edges(&image, threshold))
            .await
            .map_err(|e| ApiError::Internal(format!("Edge task failed: {e}")))
    }
}

impl Default for ProcessingService {
    fn default() -> Self {
        Self::new(GridSpec::STANDARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_grid::Rgb;

    #[tokio::test]
    async fn test_run_uniform_image() {
        let image = RasterImage::filled(400, 600, Rgb::new(250, 10, 10)).unwrap();
        let palette = Palette::from_colors(&[Rgb::BLACK, Rgb::new(255, 0, 0)]).unwrap();

        let out = ProcessingService::default()
            .run(image, palette, 128)
            .await
            .unwrap();

        assert_eq!(out.threshold, 128);
        assert_eq!(out.grid.len(), 2080);
        assert_eq!(out.grid.counts().len(), 1);
        assert_eq!(out.grid.counts()[0].color, Rgb::new(255, 0, 0));
        assert_eq!(out.edges.edge_count(), 0);
    }

    #[tokio::test]
    async fn test_edges_only() {
        let image = RasterImage::from_fn(40, 40, |x, _| if x < 20 { Rgb::BLACK } else { Rgb::WHITE })
            .unwrap();
        let mask = ProcessingService::default().edges(image, 10).await.unwrap();
        assert!(mask.edge_count() > 0);
        assert!(mask.is_edge(20, 20));
    }
}
