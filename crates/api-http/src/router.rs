//! Router Assembly

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Build the axum router over the shared application state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/events", post(handlers::submit_sync).get(handlers::count))
        .route("/events/async", post(handlers::submit_async))
        .route("/events/{id}", get(handlers::get_by_id))
        .route("/health", get(handlers::health))
        .with_state(state)
}
