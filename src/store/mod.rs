//! The location store.
//!
//! Holds the ordered collection of accepted location reports and keeps it in
//! sync with the configured persistence backend. Every operation runs under a
//! single async mutex that is held across the backend call, so a list never
//! observes a half-applied append and two writers never interleave their saves.

mod persistence;
mod record;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::{StorageConfig, StorageMode};

pub use persistence::{FilePersistence, MemoryPersistence, Persistence};
pub use record::LocationRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Invalid location data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of an append call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Number of candidates submitted, including ones that were skipped
    pub submitted: usize,
    /// Number of candidates that passed validation
    pub accepted: usize,
    /// Collection size after the append
    pub total: usize,
}

pub struct LocationStore {
    locations: Mutex<Vec<LocationRecord>>,
    backend: Arc<dyn Persistence>,
}

impl LocationStore {
    /// Open a store on top of `backend`, loading whatever it has saved.
    ///
    /// A backend that cannot be read yields an empty store; the failure is
    /// logged rather than returned.
    pub async fn open(backend: Arc<dyn Persistence>) -> Self {
        let locations = match backend.load().await {
            Ok(locations) => {
                tracing::info!(
                    mode = %backend.mode(),
                    count = locations.len(),
                    "Loaded saved locations"
                );
                locations
            }
            Err(e) => {
                tracing::error!(
                    mode = %backend.mode(),
                    error = %e,
                    "Failed to read saved locations, starting empty"
                );
                Vec::new()
            }
        };

        Self {
            locations: Mutex::new(locations),
            backend,
        }
    }

    /// Build the backend named by `config` and open a store on it.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let backend: Arc<dyn Persistence> = match config.mode {
            StorageMode::File => Arc::new(FilePersistence::init(&config.path).await),
            StorageMode::Memory => Arc::new(MemoryPersistence),
        };
        Self::open(backend).await
    }

    pub fn mode(&self) -> StorageMode {
        self.backend.mode()
    }

    /// All locations in the order they were accepted.
    pub async fn list(&self) -> Vec<LocationRecord> {
        self.locations.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.locations.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locations.lock().await.is_empty()
    }

    /// Validate and append `candidates`, then save the whole collection.
    ///
    /// Candidates without a truthy `latitude`, `longitude` and `timestamp` are
    /// skipped without error. If the save fails the appended records stay in
    /// memory.
    pub async fn append(&self, candidates: &[Value]) -> Result<AppendOutcome, StoreError> {
        let mut locations = self.locations.lock().await;
        let mut accepted = 0;

        for (index, candidate) in candidates.iter().enumerate() {
            match LocationRecord::from_candidate(candidate) {
                Some(record) => {
                    locations.push(record);
                    accepted += 1;
                }
                None => {
                    tracing::debug!(index, candidate = %candidate, "Skipping location without latitude, longitude and timestamp");
                }
            }
        }

        let outcome = AppendOutcome {
            submitted: candidates.len(),
            accepted,
            total: locations.len(),
        };

        self.backend.save(&locations).await?;
        Ok(outcome)
    }

    /// Remove every location and save the empty collection.
    ///
    /// The in-memory collection is emptied even when the save fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut locations = self.locations.lock().await;
        locations.clear();
        self.backend.save(&locations).await
    }
}
