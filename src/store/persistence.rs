//! Persistence strategies for the location store.
//!
//! The store talks to a `Persistence` trait object so the backend can be
//! chosen at startup:
//! - **File**: the whole collection is rewritten as pretty-printed JSON after
//!   every change and read back once when the store opens
//! - **Memory**: nothing is written; data lives as long as the process

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{LocationRecord, StoreError};
use crate::config::StorageMode;

/// Load and save the full location collection.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Read the previously saved collection.
    async fn load(&self) -> Result<Vec<LocationRecord>, StoreError>;

    /// Replace the saved collection with `locations`.
    async fn save(&self, locations: &[LocationRecord]) -> Result<(), StoreError>;

    fn mode(&self) -> StorageMode;
}

/// JSON file backend.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Create the backend without touching the filesystem.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Create the backend and seed the data file with an empty array if it
    /// does not exist yet.
    ///
    /// Failing to create the file is logged and otherwise ignored; the next
    /// save will report the problem to the caller.
    pub async fn init<P: Into<PathBuf>>(path: P) -> Self {
        let backend = Self::new(path);

        if fs::try_exists(&backend.path).await.unwrap_or(false) {
            return backend;
        }

        if let Err(e) = backend.create_empty().await {
            tracing::warn!(
                path = %backend.path.display(),
                error = %e,
                "Could not create location data file"
            );
        } else {
            tracing::info!(path = %backend.path.display(), "Created empty location data file");
        }

        backend
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn create_empty(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, b"[]").await?;
        Ok(())
    }
}

#[async_trait]
impl Persistence for FilePersistence {
    async fn load(&self) -> Result<Vec<LocationRecord>, StoreError> {
        let bytes = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, locations: &[LocationRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(locations)?;
        fs::write(&self.path, data).await?;
        Ok(())
    }

    fn mode(&self) -> StorageMode {
        StorageMode::File
    }
}

/// Process-memory backend. Loads nothing and accepts every save.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryPersistence;

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn load(&self) -> Result<Vec<LocationRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn save(&self, _locations: &[LocationRecord]) -> Result<(), StoreError> {
        Ok(())
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Memory
    }
}
