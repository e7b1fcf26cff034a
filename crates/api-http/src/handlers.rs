//! Route Handlers

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{CountResponse, EventResponse};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sequent_core::domain::EventId;
use tracing::warn;

/// POST /events
/// Submit an event and wait for its result. 201 with the completed event;
/// 500 if the store fails or no worker completes it within the deadline.
pub async fn submit_sync(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = state.producer.submit_sync().await.map_err(|e| {
        warn!(error = %e, "Sync submit failed");
        e
    })?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// POST /events/async
/// Submit an event and return immediately with its id. 202.
pub async fn submit_async(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = state.producer.submit_async().await?;
    Ok((StatusCode::ACCEPTED, Json(event.into())))
}

/// GET /events
/// Total events ever allocated (not completed).
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let count = state.lookup.count().await?;
    Ok(Json(CountResponse { count }))
}

/// GET /events/{id}
/// Point lookup. 404 when the id was never allocated, 400 when it is not a
/// valid integer. The id is parsed by hand so a malformed value never
/// reaches the store.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let id: EventId = raw_id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid event id: {raw_id}")))?;

    let event = state
        .lookup
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("event {id}")))?;

    Ok(Json(event.into()))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
