//! notebook-core: document model for the notebook service
//!
//! This crate provides:
//! - [`ObjectId`], the 12-byte identifier used for notebooks and notes
//! - The notebook → note → data document types and their JSON shape
//! - [`Update`], the single-document mutations every store backend applies
//!
//! Nothing in here performs I/O; storage lives in `notebook-store` and the
//! HTTP surface in `notebook-server`.

pub mod document;
pub mod object_id;
pub mod types;

pub use document::{Applied, DocumentError, Update, advance, new_notebook};
pub use object_id::{OBJECT_ID_LEN, ObjectId, ObjectIdError};
pub use types::*;
