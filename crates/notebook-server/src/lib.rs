//! notebook-server: HTTP API for notebook, note and data documents
//!
//! This crate provides:
//! - REST endpoints that map each request onto one store operation
//! - Path id and JSON body validation ahead of any store access
//! - JSON error responses
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//!
//! The store handle is opened once in `main` and injected through
//! [`AppState`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use notebook_server::{app, AppState, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let store = notebook_store::open(config.store_config()).await?;
//! let router = app(AppState::new(store, config))?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{propagate_request_id, request_id_layer};

// Re-exports for convenience
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notebook_core;
pub use notebook_store;

/// Build the router with the full middleware stack.
pub fn app(state: AppState) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&state.config().cors_allowed_origins)?;

    Ok(routes::build_router(state)
        .layer(axum::middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Build CORS layer from configuration.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let origin = if allowed_origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        // Parse comma-separated origins
        let origins = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>().map_err(|_| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("{:?} is not a valid origin", s),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_accepts_wildcard_and_lists() {
        assert!(build_cors_layer("*").is_ok());
        assert!(build_cors_layer("http://localhost:3000, https://example.org").is_ok());
    }

    #[test]
    fn test_cors_rejects_bad_origin() {
        assert!(build_cors_layer("http://bad\norigin").is_err());
    }
}
