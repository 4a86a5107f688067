//! Notebook document routes.
//!
//! - GET /notebooks - List every notebook
//! - POST /notebooks - Create a notebook
//! - GET /notebooks/{id} - Fetch a notebook and refresh its access time
//! - DELETE /notebooks/{id} - Delete a notebook with its notes
//! - GET /notebooks/title/{title} - Summary of the notebook with this title
//! - DELETE /notebooks/removeAll - Delete every notebook
//! - POST /notebooks/{id}/lastaccess - Refresh the access time
//! - GET /notebooks/{id}/lastaccessdate - Read the access time

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use notebook_core::{LastAccess, NewNotebook, Notebook, NotebookSummary, ObjectId, Update, new_notebook};

use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, NotebookPath};
use crate::state::AppState;

// ============================================================================
// Helper Functions
// ============================================================================

pub(crate) fn notebook_not_found(id: ObjectId) -> ApiError {
    ApiError::NotFound(format!("Notebook {} not found", id))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notebooks - List all notebooks.
///
/// Notebooks come back in insertion order, without pagination. Listing does
/// not refresh any access time.
///
/// # Response
///
/// - 200 OK: `[ { "id": "...", "title": "...", "notes": [...], ... } ]`
async fn list_notebooks(State(state): State<AppState>) -> ApiResult<Json<Vec<Notebook>>> {
    let notebooks = state.store().find_all().await?;

    tracing::info!(count = notebooks.len(), "Listed notebooks");

    Ok(Json(notebooks))
}

/// POST /notebooks - Create a new notebook.
///
/// # Request
///
/// Body: `{ "title": "Physics", "notes": [ { "title": "...", "text": "..." } ] }`
///
/// Notes without an `id` are given one.
///
/// # Response
///
/// - 201 Created: the stored notebook
/// - 400 Bad Request: malformed body, or two notes share an id
async fn create_notebook(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewNotebook>,
) -> ApiResult<(StatusCode, Json<Notebook>)> {
    let notebook = new_notebook(request, chrono::Utc::now())
        .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

    state.store().insert(&notebook).await?;

    tracing::info!(
        notebook_id = %notebook.id,
        title = %notebook.title,
        notes = notebook.notes.len(),
        "Notebook created"
    );

    Ok((StatusCode::CREATED, Json(notebook)))
}

/// GET /notebooks/{id} - Fetch a notebook.
///
/// Refreshes `lastAccess` and returns the document as stored after the
/// refresh.
///
/// # Response
///
/// - 200 OK: the notebook
/// - 400 Bad Request: malformed id
/// - 404 Not Found: no notebook with this id
async fn get_notebook(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<Json<Notebook>> {
    let notebook = state
        .store()
        .find_one_and_update(id, Update::Touch)
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    Ok(Json(notebook))
}

/// DELETE /notebooks/{id} - Delete a notebook and its notes.
///
/// Succeeds whether or not the notebook existed.
async fn delete_notebook(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<StatusCode> {
    let deleted = state.store().delete_one(id).await?;

    tracing::info!(notebook_id = %id, deleted, "Notebook deleted");

    Ok(StatusCode::OK)
}

/// GET /notebooks/title/{title} - Look up a notebook by exact title.
///
/// # Response
///
/// - 200 OK: `{ "id": "...", "title": "...", "lastAccess": "..." }`
/// - 404 Not Found: no notebook has this title
async fn get_notebook_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<NotebookSummary>> {
    let notebook = state
        .store()
        .find_by_title(&title)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No notebook titled {:?}", title)))?;

    Ok(Json(notebook.summary()))
}

/// DELETE /notebooks/removeAll - Delete every notebook.
async fn remove_all_notebooks(State(state): State<AppState>) -> ApiResult<StatusCode> {
    let deleted = state.store().delete_all().await?;

    tracing::warn!(deleted, "Removed all notebooks");

    Ok(StatusCode::OK)
}

/// POST /notebooks/{id}/lastaccess - Refresh the access time.
///
/// # Response
///
/// - 200 OK: `{ "lastAccess": "..." }`
/// - 404 Not Found: no notebook with this id
async fn touch_notebook(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<Json<LastAccess>> {
    let notebook = state
        .store()
        .find_one_and_update(id, Update::Touch)
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    Ok(Json(LastAccess {
        last_access: notebook.last_access,
    }))
}

/// GET /notebooks/{id}/lastaccessdate - Read the access time without
/// changing it.
async fn get_last_access(
    State(state): State<AppState>,
    NotebookPath(id): NotebookPath,
) -> ApiResult<Json<LastAccess>> {
    let notebook = state
        .store()
        .find_one(id)
        .await?
        .ok_or_else(|| notebook_not_found(id))?;

    Ok(Json(LastAccess {
        last_access: notebook.last_access,
    }))
}

/// Build notebook routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notebooks", get(list_notebooks).post(create_notebook))
        .route("/notebooks/removeAll", delete(remove_all_notebooks))
        .route("/notebooks/title/{title}", get(get_notebook_by_title))
        .route("/notebooks/{id}", get(get_notebook).delete(delete_notebook))
        .route("/notebooks/{id}/lastaccess", post(touch_notebook))
        .route("/notebooks/{id}/lastaccessdate", get(get_last_access))
}

// ============================================================================
// Tests
// ============================================================================
