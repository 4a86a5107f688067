//! Error types for the storage layer.

use notebook_core::{DocumentError, ObjectId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Notebook with this id already exists.
    #[error("duplicate notebook: {0}")]
    DuplicateNotebook(ObjectId),

    /// The update was rejected by the document rules.
    #[error("{0}")]
    Document(#[from] DocumentError),

    /// Stored row does not hold a valid notebook document.
    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
