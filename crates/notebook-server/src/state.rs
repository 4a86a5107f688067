//! Application state shared across handlers.

use std::sync::Arc;

use notebook_store::NotebookRepository;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
/// The store is created once at startup and injected here; handlers never
/// reach for a global connection.
#[derive(Clone)]
pub struct AppState {
    /// Notebook document store.
    store: Arc<dyn NotebookRepository>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn NotebookRepository>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the notebook store.
    pub fn store(&self) -> &dyn NotebookRepository {
        self.store.as_ref()
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}
