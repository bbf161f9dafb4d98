use std::path::PathBuf;

use thiserror::Error;

use crate::domain::thumbnails::ThumbnailName;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("thumbnail does not exist")]
    NotFound,
    #[error("thumbnail storage failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed storage for generated thumbnails.
///
/// Paths are always a validated [`ThumbnailName`] joined onto the root, so
/// reads and writes cannot address anything outside the directory.
#[derive(Clone)]
pub struct ThumbnailStore {
    root: PathBuf,
}

impl ThumbnailStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage root if it does not exist yet. Called once at
    /// startup so request handling never has to.
    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub async fn save(&self, name: &ThumbnailName, bytes: &[u8]) -> Result<(), StoreError> {
        tokio::fs::write(self.path_for(name), bytes).await?;
        Ok(())
    }

    pub async fn read(&self, name: &ThumbnailName) -> Result<Vec<u8>, StoreError> {
        match tokio::fs::read(self.path_for(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn path_for(&self, name: &ThumbnailName) -> PathBuf {
        self.root.join(name.as_str())
    }
}
