use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::ThumbnailService;
use crate::infrastructure::generation::{GenerationConfig, HttpImageGenerator, ImageGenerator};
use crate::infrastructure::overlay::TextRenderer;
use crate::infrastructure::stats_store::{JsonStatsStore, StatsStore};
use crate::infrastructure::storage::ThumbnailStore;

/// Everything that varies between production and test environments. The
/// stores, the generator, and the service are created from this in one
/// place.
pub struct AppStateConfig {
    pub generation: GenerationConfig,
    pub stats_path: PathBuf,
    pub storage_dir: PathBuf,
    pub renderer: TextRenderer,
}

#[derive(Clone)]
pub struct AppState {
    pub thumbnails: ThumbnailService,
}

impl AppState {
    /// Build the full application state from config: one shared HTTP
    /// client, the stats and thumbnail stores, and the pipeline service.
    pub fn from_config(config: AppStateConfig) -> Self {
        // No blanket timeout here: the generation submit and the image
        // download carry their own per-request timeouts.
        #[allow(clippy::expect_used)]
        let http_client = reqwest::ClientBuilder::new()
            .build()
            .expect("failed to build HTTP client");

        let stats_store: Arc<dyn StatsStore> = Arc::new(JsonStatsStore::new(config.stats_path));
        let generator: Arc<dyn ImageGenerator> =
            Arc::new(HttpImageGenerator::new(http_client, config.generation));
        let store = ThumbnailStore::new(config.storage_dir);

        let thumbnails = ThumbnailService::new(stats_store, generator, store, config.renderer);

        Self { thumbnails }
    }
}
