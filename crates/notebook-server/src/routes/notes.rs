//! Note routes, addressed by notebook id and note id.
//!
//! - POST /notebook/{id}/notes, POST /notebooks/{id}/notes - Append a note
//! - GET /notebooks/{id}/notes - List a notebook's notes
//! - GET /notebooks/{id}/notes/{note_id} - One note without its data
//! - DELETE /notebooks/{id}/notes/{note_id} - Remove a note
//! - PATCH /notebooks/{id}/notes/{note_id}/title - Set the title
//! - PATCH /notebooks/{id}/notes/{note_id}/text - Set the text

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use notebook_core::{NewNote, Note, NoteText, NoteTitle, NoteView, Notebook, ObjectId, Update};

use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, NotePath, NotebookPath};
use crate::routes::notebooks::notebook_not_found;
use crate::state::AppState;

pub(crate) fn note_not_found(notebook: ObjectId, note: ObjectId) -> ApiError {
    ApiError::NotFound(format!("Note {} not found in notebook {}", note, notebook))
}

/// Pick the addressed note out of a post-update notebook.
pub(crate) fn take_note(notebook: Notebook, key: NotePath) -> ApiResult<Note> {
    notebook
        .notes
        .into_iter()
        .find(|n| n.id == key.note)
        .ok_or_else(|| note_not_found(key.notebook, key.note))
}

/// POST /notebooks/{id}/notes - Append a note to a notebook.
///
/// # Request
///
/// Body: `{ "id"?: "...", "title": "...", "text": "...", "data"?: {...} }`
///
/// A note sent without `id` is given one.
///
/// # Response
///
/// - 201 Created: the stored note
/// - 400 Bad Request: malformed id or body, or the note id is already used
/// - 404 Not Found: no notebook with this id
async fn append_note(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
    JsonBody(request): JsonBody<NewNote>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = request.into_note();

    state
        .store()
        .find_one_and_update(id, Update::PushNote(note.clone()))
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    tracing::info!(notebook_id = %id, note_id = %note.id, "Note appended");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notebooks/{id}/notes - List the notes of a notebook.
async fn list_notes(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<Json<Vec<Note>>> {
    let notebook = state
        .store()
        .find_one(id)
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    Ok(Json(notebook.notes))
}

/// GET /notebooks/{id}/notes/{note_id} - Fetch one note.
///
/// # Response
///
/// - 200 OK: `{ "id": "...", "title": "...", "text": "...", "lastAccess"?: "..." }`
/// - 404 Not Found: notebook or note missing
async fn get_note(State(state): State<AppState>, key: NotePath) -> ApiResult<Json<NoteView>> {
    let notebook = state
        .store()
        .find_one(key.notebook)
        .await?
        .ok_or_else(|| notebook_not_found(key.notebook))?;

    let note = notebook
        .note(key.note)
        .ok_or_else(|| note_not_found(key.notebook, key.note))?;

    Ok(Json(NoteView::from(note)))
}

/// DELETE /notebooks/{id}/notes/{note_id} - Remove a note.
///
/// Succeeds even when the notebook or the note does not exist.
async fn remove_note(State(state): State<AppState>, key: NotePath) -> ApiResult<StatusCode> {
    let matched = state
        .store()
        .find_one_and_update(key.notebook, Update::PullNote(key.note))
        .await?
        .is_some();

    tracing::info!(
        notebook_id = %key.notebook,
        note_id = %key.note,
        matched,
        "Note removed"
    );

    Ok(StatusCode::OK)
}

/// PATCH /notebooks/{id}/notes/{note_id}/title - Set a note's title.
///
/// # Request
///
/// Body: `{ "title": "..." }`
///
/// # Response
///
/// - 200 OK: the updated note
/// - 404 Not Found: notebook or note missing
async fn set_note_title(
    State(state): State<AppState>,
    key: NotePath,
    JsonBody(NoteTitle { title }): JsonBody<NoteTitle>,
) -> ApiResult<Json<Note>> {
    let update = Update::SetNoteTitle {
        note: key.note,
        title,
    };
    let notebook = state
        .store()
        .find_one_and_update(key.notebook, update)
        .await?
        .ok_or_else(|| note_not_found(key.notebook, key.note))?;

    Ok(Json(take_note(notebook, key)?))
}

/// PATCH /notebooks/{id}/notes/{note_id}/text - Set a note's text.
///
/// # Request
///
/// Body: `{ "text": "..." }`
///
/// # Response
///
/// - 200 OK: the updated note
/// - 404 Not Found: notebook or note missing
async fn set_note_text(
    State(state): State<AppState>,
    key: NotePath,
    JsonBody(NoteText { text }): JsonBody<NoteText>,
) -> ApiResult<Json<Note>> {
    let update = Update::SetNoteText {
        note: key.note,
        text,
    };
    let notebook = state
        .store()
        .find_one_and_update(key.notebook, update)
        .await?
        .ok_or_else(|| note_not_found(key.notebook, key.note))?;

    Ok(Json(take_note(notebook, key)?))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notebook/{id}/notes", post(append_note))
        .route("/notebooks/{id}/notes", get(list_notes).post(append_note))
        .route(
            "/notebooks/{id}/notes/{note_id}",
            get(get_note).delete(remove_note),
        )
        .route("/notebooks/{id}/notes/{note_id}/title", patch(set_note_title))
        .route("/notebooks/{id}/notes/{note_id}/text", patch(set_note_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notebook_core::{NewNotebook, new_notebook};

    #[test]
    fn test_take_note_finds_the_addressed_note() {
        let notebook = new_notebook(
            NewNotebook {
                title: "Physics".into(),
                notes: vec![NewNote::new("a", "x"), NewNote::new("b", "y")],
            },
            Utc::now(),
        )
        .unwrap();
        let key = NotePath {
            notebook: notebook.id,
            note: notebook.notes[1].id,
        };

        let note = take_note(notebook, key).unwrap();
        assert_eq!(note.title, "b");
    }

    #[test]
    fn test_take_note_missing_is_not_found() {
        let notebook = new_notebook(NewNotebook::default(), Utc::now()).unwrap();
        let key = NotePath {
            notebook: notebook.id,
            note: ObjectId::new(),
        };

        let err = take_note(notebook, key).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
