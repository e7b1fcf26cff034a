//! HTTP Response Types

use sequent_core::domain::Event;
use serde::Serialize;

/// Body for submit and lookup responses: `{id, value}` with `value: null`
/// while the event is pending.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub value: Option<String>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            value: event.value,
        }
    }
}

/// Body for GET /events: total events ever allocated.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
