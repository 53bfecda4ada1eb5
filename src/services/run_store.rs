use crate::error::ApiError;
use crate::services::processing::RunOutput;
use chrono::{DateTime, Utc};
use color_grid::{Palette, RasterImage};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One uploaded image and the latest result computed for it
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: String,
    pub palette_name: String,
    pub palette: Palette,
    pub image: RasterImage,
    /// Generation of the result currently served
    pub generation: u64,
    /// Highest recompute request handed out so far
    pub latest_request: u64,
    pub output: Arc<RunOutput>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Permission to recompute a run, tied to the request that asked for it
#[derive(Debug, Clone)]
pub struct RunTicket {
    pub id: String,
    pub request: u64,
    pub image: RasterImage,
    pub palette: Palette,
}

/// What happened to a finished recompute
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    Applied(RunRecord),
    /// A newer request was issued while this one ran; the result was dropped
    Superseded { latest_request: u64 },
}

/// Default number of runs kept in memory
pub const DEFAULT_MAX_RUNS: usize = 64;

#[derive(Default)]
struct Runs {
    by_id: HashMap<String, RunRecord>,
    /// Run ids, oldest first
    order: VecDeque<String>,
}

/// In-memory store of processing runs, keyed by run id.
///
/// Holds at most `capacity` runs; creating another evicts the oldest.
pub struct RunStore {
    runs: Arc<RwLock<Runs>>,
    capacity: usize,
}

impl RunStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_RUNS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Arc::new(RwLock::new(Runs::default())),
            capacity: capacity.max(1),
        }
    }

    /// Store a freshly processed image as generation 1
    pub async fn create(
        &self,
        palette_name: String,
        palette: Palette,
        image: RasterImage,
        output: RunOutput,
    ) -> RunRecord {
        let now = Utc::now();
        let record = RunRecord {
            id: hex::encode(rand::random::<[u8; 8]>()),
            palette_name,
            palette,
            image,
            generation: 1,
            latest_request: 1,
            output: Arc::new(output),
            created_at: now,
            updated_at: now,
        };

        let mut runs = self.runs.write().await;
        while runs.order.len() >= self.capacity {
            let Some(oldest) = runs.order.pop_front() else {
                break;
            };
            runs.by_id.remove(&oldest);
            tracing::debug!(run_id = %oldest, "Evicted oldest run");
        }
        runs.order.push_back(record.id.clone());
        runs.by_id.insert(record.id.clone(), record.clone());
        tracing::info!(run_id = %record.id, palette = %record.palette_name, "Run created");
        record
    }

    pub async fn get(&self, id: &str) -> Result<RunRecord, ApiError> {
        let runs = self.runs.read().await;
        runs.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::RunNotFound(id.to_string()))
    }

    /// Register a recompute request. Earlier outstanding requests become stale.
    pub async fn begin(&self, id: &str) -> Result<RunTicket, ApiError> {
        let mut runs = self.runs.write().await;
        let record = runs
            .by_id
            .get_mut(id)
            .ok_or_else(|| ApiError::RunNotFound(id.to_string()))?;
        record.latest_request += 1;

        Ok(RunTicket {
            id: record.id.clone(),
            request: record.latest_request,
            image: record.image.clone(),
            palette: record.palette.clone(),
        })
    }

    /// Publish the result of `ticket` unless a newer request was issued.
    pub async fn commit(&self, ticket: &RunTicket, output: RunOutput) -> Result<CommitOutcome, ApiError> {
        let mut runs = self.runs.write().await;
        let record = runs
            .by_id
            .get_mut(&ticket.id)
            .ok_or_else(|| ApiError::RunNotFound(ticket.id.clone()))?;

        if ticket.request != record.latest_request {
            tracing::debug!(
                run_id = %ticket.id,
                request = ticket.request,
                latest = record.latest_request,
                "Discarding superseded result"
            );
            return Ok(CommitOutcome::Superseded {
                latest_request: record.latest_request,
            });
        }

        record.generation += 1;
        record.output = Arc::new(output);
        record.updated_at = Utc::now();
        Ok(CommitOutcome::Applied(record.clone()))
    }

    pub async fn len(&self) -> usize {
        self.runs.read().await.by_id.len()
    }
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_grid::{GridPipeline, Rgb};

    fn output(image: &RasterImage, palette: &Palette, threshold: u8) -> RunOutput {
        let out = GridPipeline::new(palette.clone())
            .threshold(threshold)
            .recompute(image);
        RunOutput {
            grid: out.grid,
            edges: out.edges,
            threshold,
        }
    }

    async fn seeded() -> (RunStore, RunRecord) {
        let store = RunStore::new();
        let image = RasterImage::filled(400, 600, Rgb::WHITE).unwrap();
        let palette = Palette::from_colors(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
        let out = output(&image, &palette, 128);
        let record = store.create("mono".into(), palette, image, out).await;
        (store, record)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (store, record) = seeded().await;
        assert_eq!(record.id.len(), 16);
        assert_eq!(record.generation, 1);

        let found = store.get(&record.id).await.unwrap();
        assert_eq!(found.palette_name, "mono");
        assert_eq!(store.len().await, 1);
        assert!(matches!(store.get("missing").await, Err(ApiError::RunNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_evicts_oldest_beyond_capacity() {
        let store = RunStore::with_capacity(3);
        let image = RasterImage::filled(40, 40, Rgb::WHITE).unwrap();
        let palette = Palette::from_colors(&[Rgb::BLACK, Rgb::WHITE]).unwrap();

        let mut ids = Vec::new();
        for _ in 0..5 {
            let out = output(&image, &palette, 128);
            let record = store
                .create("mono".into(), palette.clone(), image.clone(), out)
                .await;
            ids.push(record.id);
        }

        assert_eq!(store.len().await, 3);
        for evicted in &ids[..2] {
            assert!(matches!(store.get(evicted).await, Err(ApiError::RunNotFound(_))));
        }
        for kept in &ids[2..] {
            assert!(store.get(kept).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_commit_to_evicted_run_is_not_found() {
        let store = RunStore::with_capacity(1);
        let image = RasterImage::filled(40, 40, Rgb::WHITE).unwrap();
        let palette = Palette::from_colors(&[Rgb::BLACK]).unwrap();

        let first = store
            .create("a".into(), palette.clone(), image.clone(), output(&image, &palette, 1))
            .await;
        let ticket = store.begin(&first.id).await.unwrap();
        store
            .create("b".into(), palette.clone(), image.clone(), output(&image, &palette, 1))
            .await;

        let result = store.commit(&ticket, output(&image, &palette, 2)).await;
        assert!(matches!(result, Err(ApiError::RunNotFound(_))));
    }

    #[tokio::test]
    async fn test_commit_bumps_generation() {
        let (store, record) = seeded().await;
        let ticket = store.begin(&record.id).await.unwrap();
        let out = output(&ticket.image, &ticket.palette, 40);

        match store.commit(&ticket, out).await.unwrap() {
            CommitOutcome::Applied(updated) => {
                assert_eq!(updated.generation, 2);
                assert_eq!(updated.output.threshold, 40);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_last_request_wins() {
        let (store, record) = seeded().await;
        let first = store.begin(&record.id).await.unwrap();
        let second = store.begin(&record.id).await.unwrap();

        let late = store
            .commit(&second, output(&second.image, &second.palette, 200))
            .await
            .unwrap();
        assert!(matches!(late, CommitOutcome::Applied(ref r) if r.output.threshold == 200));

        let early = store
            .commit(&first, output(&first.image, &first.palette, 10))
            .await
            .unwrap();
        assert!(matches!(early, CommitOutcome::Superseded { latest_request: 3 }));

        let current = store.get(&record.id).await.unwrap();
        assert_eq!(current.generation, 2);
        assert_eq!(current.output.threshold, 200);
    }
}
