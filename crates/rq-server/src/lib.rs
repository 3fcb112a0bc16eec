//! reqsmith HTTP API server (Axum).
//!
//! Upload a document, get its normalized text back under a session
//! handle, and drive downstream generation from the cached text.

pub mod error;
pub mod generate;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::document_routes())
        .merge(routes::session_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
