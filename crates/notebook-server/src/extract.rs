//! Request extractors that validate path ids and JSON bodies.
//!
//! Every id in the path is parsed before a handler runs, so a malformed id
//! never reaches the store. Rejections are reported as
//! [`ApiError::InvalidArgument`] with the same JSON body as other errors.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use notebook_core::ObjectId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Notebook id taken from the single `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct NotebookPath(pub ObjectId);

impl<S> FromRequestParts<S> for NotebookPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidArgument(e.body_text()))?;
        Ok(Self(parse_notebook_id(&raw)?))
    }
}

/// Compound key from `{id}/notes/{noteId}`.
#[derive(Debug, Clone, Copy)]
pub struct NotePath {
    pub notebook: ObjectId,
    pub note: ObjectId,
}

impl<S> FromRequestParts<S> for NotePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((notebook, note)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidArgument(e.body_text()))?;
        Ok(Self {
            notebook: parse_notebook_id(&notebook)?,
            note: parse_note_id(&note)?,
        })
    }
}

/// JSON body whose decode failures are reported as `InvalidArgument`.
///
/// The `Content-Type` header is not required.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Decoded regardless of Content-Type; only the body itself is checked.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidArgument(e.body_text()))?;
        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| ApiError::InvalidArgument(e.body_text()))?;
        Ok(Self(value))
    }
}

fn parse_notebook_id(raw: &str) -> Result<ObjectId, ApiError> {
    raw.parse().map_err(|e| {
        tracing::debug!(id = %raw, error = %e, "Rejected notebook id");
        ApiError::InvalidArgument("Invalid Notebook ID format".to_string())
    })
}

fn parse_note_id(raw: &str) -> Result<ObjectId, ApiError> {
    raw.parse().map_err(|e| {
        tracing::debug!(id = %raw, error = %e, "Rejected note id");
        ApiError::InvalidArgument("Invalid Note ID format".to_string())
    })
}
