use std::sync::Arc;

use tracing::{error, info};

use crate::application::errors::AppError;
use crate::domain::prompt::build_prompt;
use crate::domain::stats::TrendStats;
use crate::domain::thumbnails::{GeneratedThumbnail, ThumbnailName};
use crate::infrastructure::compositor;
use crate::infrastructure::generation::ImageGenerator;
use crate::infrastructure::overlay::TextRenderer;
use crate::infrastructure::stats_store::StatsStore;
use crate::infrastructure::storage::{StoreError, ThumbnailStore};

/// The one message callers see for any pipeline failure. Which stage broke
/// and why is logged, not leaked.
const GENERATION_FAILED: &str = "thumbnail generation failed";

/// Orchestrates the thumbnail pipeline: stats, prompt, remote generation,
/// title overlay, and persistence.
#[derive(Clone)]
pub struct ThumbnailService {
    stats_store: Arc<dyn StatsStore>,
    generator: Arc<dyn ImageGenerator>,
    store: ThumbnailStore,
    renderer: TextRenderer,
}

impl ThumbnailService {
    pub fn new(
        stats_store: Arc<dyn StatsStore>,
        generator: Arc<dyn ImageGenerator>,
        store: ThumbnailStore,
        renderer: TextRenderer,
    ) -> Self {
        Self {
            stats_store,
            generator,
            store,
            renderer,
        }
    }

    /// Create the storage root if needed. Called once at server startup.
    pub async fn ensure_storage(&self) -> Result<(), StoreError> {
        self.store.ensure_root().await
    }

    /// Run the full pipeline for a title.
    ///
    /// Validation happens before anything else, so a bad title never
    /// reaches the remote service. Stats are loaded once and used for both
    /// the prompt and the overlay, so one request sees one snapshot.
    pub async fn generate(&self, title: &str) -> Result<GeneratedThumbnail, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("title is required"));
        }

        let stats = self.stats_store.load().await;
        let prompt = build_prompt(title, stats.as_ref());
        info!(prompt = %prompt, "submitting generation prompt");

        let image_bytes = self.generator.generate(&prompt).await.map_err(|err| {
            error!(error = %err, "image generation failed");
            AppError::generation_failed(GENERATION_FAILED)
        })?;

        let encoded = self
            .compose_blocking(image_bytes, title.to_string(), stats)
            .await?;

        let name = ThumbnailName::generate(chrono::Utc::now());
        self.store.save(&name, &encoded).await.map_err(|err| {
            error!(error = %err, name = %name, "failed to write thumbnail");
            AppError::generation_failed(GENERATION_FAILED)
        })?;

        info!(name = %name, bytes = encoded.len(), "thumbnail generated");

        Ok(GeneratedThumbnail {
            url: format!("/thumbnails/{name}"),
            filename: name.into_string(),
        })
    }

    /// The currently persisted trending statistics, if any.
    pub async fn stats(&self) -> Option<TrendStats> {
        self.stats_store.load().await
    }

    /// Read a previously generated thumbnail by filename.
    pub async fn thumbnail(&self, name: &str) -> Result<Vec<u8>, AppError> {
        let name = ThumbnailName::parse(name)
            .map_err(|_| AppError::validation("invalid thumbnail filename"))?;

        match self.store.read(&name).await {
            Ok(bytes) => Ok(bytes),
            Err(StoreError::NotFound) => Err(AppError::not_found("thumbnail not found")),
            Err(err) => {
                error!(error = %err, name = %name, "failed to read thumbnail");
                Err(AppError::unexpected("failed to read thumbnail"))
            }
        }
    }

    /// Decode, overlay, and encode off the async executor.
    async fn compose_blocking(
        &self,
        image_bytes: Vec<u8>,
        title: String,
        stats: Option<TrendStats>,
    ) -> Result<Vec<u8>, AppError> {
        let renderer = self.renderer.clone();
        let result = tokio::task::spawn_blocking(move || {
            compositor::compose(&image_bytes, &title, stats.as_ref(), &renderer)
        })
        .await;

        match result {
            Ok(Ok(encoded)) => Ok(encoded),
            Ok(Err(err)) => {
                error!(error = %err, "thumbnail composition failed");
                Err(AppError::generation_failed(GENERATION_FAILED))
            }
            Err(err) => {
                error!(error = %err, "thumbnail composition task failed to complete");
                Err(AppError::generation_failed(GENERATION_FAILED))
            }
        }
    }
}
