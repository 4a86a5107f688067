//! Route definitions for the HTTP API.

pub mod data;
pub mod health;
pub mod notebooks;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(notebooks::routes())
        .merge(notes::routes())
        .merge(data::routes())
        .with_state(state)
}
