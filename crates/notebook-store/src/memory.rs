//! In-process backend.
//!
//! Keeps notebooks in a `Vec` behind an async `RwLock`, in insertion
//! order. Updates apply to a copy and replace the stored document only
//! when they succeed, so a rejected update leaves nothing behind. Used by
//! the HTTP tests and for running the server without a database
//! (`DATABASE_URL=memory://`).

use async_trait::async_trait;
use chrono::Utc;
use notebook_core::{Applied, Notebook, ObjectId, Update};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repository::NotebookRepository;

/// Notebook store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notebooks: RwLock<Vec<Notebook>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotebookRepository for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Notebook>> {
        Ok(self.notebooks.read().await.clone())
    }

    async fn find_one(&self, id: ObjectId) -> StoreResult<Option<Notebook>> {
        Ok(self.notebooks.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Notebook>> {
        Ok(self
            .notebooks
            .read()
            .await
            .iter()
            .find(|n| n.title == title)
            .cloned())
    }

    async fn insert(&self, notebook: &Notebook) -> StoreResult<()> {
        let mut notebooks = self.notebooks.write().await;
        if notebooks.iter().any(|n| n.id == notebook.id) {
            return Err(StoreError::DuplicateNotebook(notebook.id));
        }
        notebooks.push(notebook.clone());
        Ok(())
    }

    async fn delete_one(&self, id: ObjectId) -> StoreResult<u64> {
        let mut notebooks = self.notebooks.write().await;
        let before = notebooks.len();
        notebooks.retain(|n| n.id != id);
        Ok((before - notebooks.len()) as u64)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut notebooks = self.notebooks.write().await;
        let removed = notebooks.len() as u64;
        notebooks.clear();
        Ok(removed)
    }

    async fn find_one_and_update(&self, id: ObjectId, update: Update) -> StoreResult<Option<Notebook>> {
        let mut notebooks = self.notebooks.write().await;
        let Some(stored) = notebooks.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };

        let mut updated = stored.clone();
        if update.apply(&mut updated, Utc::now())? == Applied::NoMatch {
            return Ok(None);
        }

        *stored = updated.clone();
        tracing::debug!(notebook_id = %id, op = update.name(), "Updated notebook");
        Ok(Some(updated))
    }

    async fn update_all(&self, update: Update) -> StoreResult<u64> {
        let mut notebooks = self.notebooks.write().await;
        let now = Utc::now();

        // Stage every change first so one rejected document aborts the lot.
        let mut staged = notebooks.clone();
        let mut matched = 0;
        for notebook in &mut staged {
            if update.apply(notebook, now)? == Applied::Modified {
                matched += 1;
            }
        }

        *notebooks = staged;
        Ok(matched)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebook_core::{Data, NewNote, NewNotebook, NotebookPatch, Query, new_notebook};

    async fn seeded(titles: &[&str]) -> (MemoryStore, Notebook) {
        let store = MemoryStore::new();
        let notebook = new_notebook(
            NewNotebook {
                title: "Physics".into(),
                notes: titles.iter().map(|t| NewNote::new(*t, "body")).collect(),
            },
            Utc::now(),
        )
        .unwrap();
        store.insert(&notebook).await.unwrap();
        (store, notebook)
    }

    #[tokio::test]
    async fn insert_and_find() {
        let (store, notebook) = seeded(&["a"]).await;

        let found = store.find_one(notebook.id).await.unwrap().unwrap();
        assert_eq!(found, notebook);
        assert!(store.find_one(ObjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let (store, notebook) = seeded(&[]).await;
        let err = store.insert(&notebook).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateNotebook(id) if id == notebook.id));
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            let nb = new_notebook(
                NewNotebook {
                    title: title.into(),
                    notes: vec![],
                },
                Utc::now(),
            )
            .unwrap();
            store.insert(&nb).await.unwrap();
        }

        let titles: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn find_by_title_is_exact() {
        let (store, notebook) = seeded(&[]).await;

        let found = store.find_by_title("Physics").await.unwrap().unwrap();
        assert_eq!(found.id, notebook.id);
        assert!(store.find_by_title("physics").await.unwrap().is_none());
        assert!(store.find_by_title("Phys").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (store, notebook) = seeded(&[]).await;

        assert_eq!(store.delete_one(notebook.id).await.unwrap(), 1);
        assert_eq!(store.delete_one(notebook.id).await.unwrap(), 0);
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_missing_notebook_returns_none() {
        let store = MemoryStore::new();
        let result = store
            .find_one_and_update(ObjectId::new(), Update::Touch)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_missing_note_returns_none_and_keeps_document() {
        let (store, notebook) = seeded(&["a"]).await;

        let result = store
            .find_one_and_update(
                notebook.id,
                Update::SetNoteTitle {
                    note: ObjectId::new(),
                    title: "x".into(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.find_one(notebook.id).await.unwrap().unwrap(), notebook);
    }

    #[tokio::test]
    async fn update_returns_post_update_document() {
        let (store, notebook) = seeded(&["a"]).await;
        let note_id = notebook.notes[0].id;
        let data = Data {
            info: "new".into(),
            queries: vec![Query::new("q", "r")],
        };

        let updated = store
            .find_one_and_update(
                notebook.id,
                Update::SetNoteData {
                    note: note_id,
                    data: data.clone(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.notes[0].data, data);
        assert!(updated.last_access > notebook.last_access);
        assert_eq!(store.find_one(notebook.id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn rejected_update_is_not_stored() {
        let (store, notebook) = seeded(&["a"]).await;
        let existing = notebook.notes[0].clone();

        let err = store
            .find_one_and_update(notebook.id, Update::PushNote(existing))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Document(_)));
        assert_eq!(store.find_one(notebook.id).await.unwrap().unwrap(), notebook);
    }

    #[tokio::test]
    async fn update_all_counts_every_document() {
        let store = MemoryStore::new();
        for _ in 0..3 {
            let mut nb = new_notebook(
                NewNotebook {
                    title: "t".into(),
                    notes: vec![NewNote::new("n", "")],
                },
                Utc::now(),
            )
            .unwrap();
            nb.notes[0].data.info = "x".into();
            store.insert(&nb).await.unwrap();
        }

        let matched = store.update_all(Update::ClearAllNoteData).await.unwrap();
        assert_eq!(matched, 3);

        let all = store.find_all().await.unwrap();
        assert!(all.iter().all(|nb| nb.notes.iter().all(|n| n.data.is_empty())));
    }

    #[tokio::test]
    async fn merge_through_store() {
        let (store, notebook) = seeded(&["a"]).await;

        let updated = store
            .find_one_and_update(
                notebook.id,
                Update::Merge(NotebookPatch {
                    title: Some("X".into()),
                    ..NotebookPatch::default()
                }),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "X");
        assert_eq!(updated.notes, notebook.notes);
        assert_eq!(updated.created, notebook.created);
    }
}
