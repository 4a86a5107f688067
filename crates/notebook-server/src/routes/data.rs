//! Data payload routes.
//!
//! - PATCH /notebooks/{id}/data - Sparse merge of notebook fields
//! - GET /notebooks/{id}/data - Data of every note in a notebook
//! - DELETE /notebooks/{id}/data - Clear the data of every note in a notebook
//! - DELETE /notebooks/removeAllData - Clear the data of every note everywhere
//! - GET /notebooks/{id}/notes/{note_id}/data - One note's data
//! - POST, PATCH /notebooks/{id}/notes/{note_id}/data - Replace one note's data
//! - DELETE /notebooks/{id}/notes/{note_id}/data - Clear one note's data
//! - GET /notebooks/{id}/notes/{note_id}/alldata - One note's data

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use notebook_core::{Data, Notebook, NotebookPatch, Update};

use crate::error::ApiResult;
use crate::extract::{JsonBody, NotePath, NotebookPath};
use crate::routes::notebooks::notebook_not_found;
use crate::routes::notes::{note_not_found, take_note};
use crate::state::AppState;

// ============================================================================
// Notebook-level handlers
// ============================================================================

/// PATCH /notebooks/{id}/data - Sparse merge of notebook fields.
///
/// Only the fields present in the body are written. A field sent as an
/// empty string, list or object is written too; `null` counts as absent.
/// `lastAccess` is kept by the server and ignored here.
///
/// # Request
///
/// Body: `{ "title"?: "...", "notes"?: [...], "created"?: "...", "data"?: {...} }`
///
/// # Response
///
/// - 200 OK: the notebook after the merge
/// - 400 Bad Request: malformed id or body, duplicate note ids
/// - 404 Not Found: no notebook with this id
async fn patch_notebook(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
    JsonBody(patch): JsonBody<NotebookPatch>,
) -> ApiResult<Json<Notebook>> {
    let empty = patch.is_empty();
    let notebook = state
        .store()
        .find_one_and_update(id, Update::Merge(patch))
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    tracing::info!(notebook_id = %id, empty, "Notebook patched");

    Ok(Json(notebook))
}

/// GET /notebooks/{id}/data - Data of every note, in note order.
async fn get_notebook_data(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<Json<Vec<Data>>> {
    let notebook = state
        .store()
        .find_one(id)
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    Ok(Json(notebook.note_data()))
}

/// DELETE /notebooks/{id}/data - Clear the data of every note in one notebook.
///
/// Succeeds even when the notebook does not exist.
async fn clear_notebook_data(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<StatusCode> {
    let matched = state
        .store()
        .find_one_and_update(id, Update::ClearAllNoteData)
        .await?
        .is_some();

    tracing::info!(notebook_id = %id, matched, "Cleared note data");

    Ok(StatusCode::OK)
}

/// DELETE /notebooks/removeAllData - Clear the data of every note in every
/// notebook.
async fn clear_all_data(State(state): State<AppState>) -> ApiResult<StatusCode> {
    let matched = state.store().update_all(Update::ClearAllNoteData).await?;

    tracing::warn!(notebooks = matched, "Cleared note data in all notebooks");

    Ok(StatusCode::OK)
}

// ============================================================================
// Note-level handlers
// ============================================================================

/// GET /notebooks/{id}/notes/{note_id}/data - One note's data.
///
/// Also served as `.../alldata`.
///
/// # Response
///
/// - 200 OK: `{ "info"?: "...", "queries"?: [ { "question": "...", "response": "..." } ] }`
/// - 404 Not Found: notebook or note missing
async fn get_note_data(State(state): State<AppState>, key: NotePath) -> ApiResult<Json<Data>> {
    let notebook = state
        .store()
        .find_one(key.notebook)
        .await?
        .ok_or_else(|| notebook_not_found(key.notebook))?;

    Ok(Json(take_note(notebook, key)?.data))
}

/// POST|PATCH /notebooks/{id}/notes/{note_id}/data - Replace one note's data.
///
/// The payload replaces the stored data wholesale.
///
/// # Response
///
/// - 200 OK: the data as stored
/// - 404 Not Found: notebook or note missing
async fn set_note_data(
    State(state): State<AppState>,
    key: NotePath,
    JsonBody(data): JsonBody<Data>,
) -> ApiResult<Json<Data>> {
    let update = Update::SetNoteData {
        note: key.note,
        data,
    };
    let notebook = state
        .store()
        .find_one_and_update(key.notebook, update)
        .await?
        .ok_or_else(|| note_not_found(key.notebook, key.note))?;

    Ok(Json(take_note(notebook, key)?.data))
}

/// DELETE /notebooks/{id}/notes/{note_id}/data - Clear one note's data.
///
/// Succeeds even when the notebook or the note does not exist.
async fn clear_note_data(State(state): State<AppState>, key: NotePath) -> ApiResult<StatusCode> {
    let matched = state
        .store()
        .find_one_and_update(key.notebook, Update::ClearNoteData { note: key.note })
        .await?
        .is_some();

    tracing::info!(
        notebook_id = %key.notebook,
        note_id = %key.note,
        matched,
        "Cleared note data"
    );

    Ok(StatusCode::OK)
}

/// Build data routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notebooks/removeAllData", delete(clear_all_data))
        .route(
            "/notebooks/{id}/data",
            get(get_notebook_data)
                .patch(patch_notebook)
                .delete(clear_notebook_data),
        )
        .route(
            "/notebooks/{id}/notes/{note_id}/data",
            get(get_note_data)
                .post(set_note_data)
                .patch(set_note_data)
                .delete(clear_note_data),
        )
        .route("/notebooks/{id}/notes/{note_id}/alldata", get(get_note_data))
}
