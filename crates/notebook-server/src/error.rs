//! API error types with JSON responses.
//!
//! | variant           | status | when                                        |
//! |-------------------|--------|---------------------------------------------|
//! | `InvalidArgument` | 400    | malformed id in the path, malformed body    |
//! | `NotFound`        | 404    | no document (or no note) matched            |
//! | `Store`           | 500    | anything the store reports, message kept    |
//!
//! A store error caused by the document rules (duplicate note id) is a bad
//! request, not a server failure, and maps to 400.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notebook_store::StoreError;
use serde::{Deserialize, Serialize};

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("{0}")]
    InvalidArgument(String),

    /// Not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Store error.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) | Self::Store(StoreError::Document(_)) => "INVALID_ARGUMENT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(_) => "STORE_FAILURE",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) | Self::Store(StoreError::Document(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
