//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::LocationStore;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The location store is constructed once at startup and injected here; no
/// handler reaches for global state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<LocationStore>,
}

impl AppState {
    /// Creates a new application state from the given configuration and store.
    pub fn new(config: AppConfig, store: LocationStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}
