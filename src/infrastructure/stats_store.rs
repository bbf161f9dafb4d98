use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::stats::TrendStats;

/// Read-only access to the trending-thumbnail statistics record.
///
/// Absence is an expected state rather than an error: a missing, unreadable,
/// or unparseable record behaves exactly like "no statistics yet" and the
/// pipeline proceeds without trend data.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn load(&self) -> Option<TrendStats>;
}

/// Stats store backed by the JSON document the offline analysis job writes.
/// The file is re-read on every call so a refreshed record is picked up
/// without a restart.
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StatsStore for JsonStatsStore {
    async fn load(&self) -> Option<TrendStats> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stats record present");
                return None;
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read stats record");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "stats record is not valid JSON");
                None
            }
        }
    }
}
