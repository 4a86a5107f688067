//! Repository interface shared by every storage backend.
//!
//! Handlers only see [`NotebookRepository`]; the concrete backend is chosen
//! once at startup and injected as an `Arc<dyn NotebookRepository>`.
//!
//! All operations address one notebook document, except the `*_all`
//! variants which visit every document. Each single-document update is
//! atomic: the backend loads the notebook, applies the [`Update`] and
//! writes it back without another writer interleaving on that document.

use std::sync::Arc;

use async_trait::async_trait;
use notebook_core::{Notebook, ObjectId, Update};

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::store::{Store, StoreConfig};

/// Storage operations on notebook documents.
#[async_trait]
pub trait NotebookRepository: Send + Sync + std::fmt::Debug {
    /// All notebooks in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<Notebook>>;

    /// One notebook by id.
    async fn find_one(&self, id: ObjectId) -> StoreResult<Option<Notebook>>;

    /// First notebook (in insertion order) with exactly this title.
    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Notebook>>;

    /// Store a new notebook.
    async fn insert(&self, notebook: &Notebook) -> StoreResult<()>;

    /// Delete one notebook, returning the number of documents removed.
    async fn delete_one(&self, id: ObjectId) -> StoreResult<u64>;

    /// Delete every notebook, returning the number of documents removed.
    async fn delete_all(&self) -> StoreResult<u64>;

    /// Apply `update` to one notebook and return the post-update document.
    ///
    /// Returns `None` when the notebook does not exist or, for updates that
    /// address a note, when the note is not in the notebook.
    async fn find_one_and_update(&self, id: ObjectId, update: Update) -> StoreResult<Option<Notebook>>;

    /// Apply `update` to every notebook, returning how many matched.
    async fn update_all(&self, update: Update) -> StoreResult<u64>;

    /// Release backend resources. Called once at shutdown.
    async fn close(&self);
}

/// Open the backend named by `config.database_url`.
///
/// `memory://` selects the in-process backend; anything else is treated as
/// a PostgreSQL connection string.
pub async fn open(config: StoreConfig) -> StoreResult<Arc<dyn NotebookRepository>> {
    if config.is_memory() {
        tracing::info!("Using in-memory notebook store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = Store::connect(config).await?;
    Ok(Arc::new(store))
}
