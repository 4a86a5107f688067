//! notebook-store: Storage layer for the notebook service
//!
//! This crate provides:
//! - The [`NotebookRepository`] trait handlers program against
//! - [`Store`], a PostgreSQL backend keeping each notebook as a JSONB document
//! - [`MemoryStore`], an in-process backend for tests and local runs
//! - Migration management
//!
//! # Usage
//!
//! ```rust,ignore
//! use notebook_store::{StoreConfig, open};
//!
//! let config = StoreConfig::from_env()?;
//! let store = open(config).await?;
//!
//! let notebooks = store.find_all().await?;
//! store.close().await;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::NotebookRow;
pub use repository::{NotebookRepository, open};
pub use store::{MEMORY_URL_SCHEME, Store, StoreConfig};

// Re-export notebook-core for downstream crates
pub use notebook_core;
