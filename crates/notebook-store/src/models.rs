//! Database models for the storage layer.
//!
//! A notebook is stored as one row: the full document lives in a JSONB
//! column, with `id` and `title` copied out into plain columns for the
//! primary key and the title lookup.

use notebook_core::{Notebook, ObjectId};
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};

/// Database row for the `notebooks` table.
#[derive(Debug, Clone, FromRow)]
pub struct NotebookRow {
    /// ObjectId as 24 hex chars.
    pub id: String,
    pub title: String,
    pub document: serde_json::Value,
}

impl NotebookRow {
    /// Encode a notebook into its row form.
    pub fn from_notebook(notebook: &Notebook) -> StoreResult<Self> {
        Ok(Self {
            id: notebook.id.to_string(),
            title: notebook.title.clone(),
            document: serde_json::to_value(notebook)?,
        })
    }

    /// Decode the stored document.
    pub fn into_notebook(self) -> StoreResult<Notebook> {
        let notebook: Notebook = serde_json::from_value(self.document)?;
        if notebook.id.to_string() != self.id {
            return Err(StoreError::CorruptDocument(format!(
                "document id {} does not match row id {}",
                notebook.id, self.id
            )));
        }
        Ok(notebook)
    }

    /// Parse the row id.
    pub fn object_id(&self) -> Option<ObjectId> {
        self.id.parse().ok()
    }
}
