// Event Domain Model

use serde::{Deserialize, Serialize};

/// Event identifier, allocated by the shared counter.
///
/// Ids start at 1 and form a contiguous increasing sequence; 0 is the
/// counter's initial "no events yet" value and never names an event.
pub type EventId = i64;

/// A queue item. `value` absent means pending, present means completed.
///
/// Once a value is set it is never changed or cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub value: Option<String>,
}

impl Event {
    pub fn pending(id: EventId) -> Self {
        Self { id, value: None }
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.value.is_some()
    }
}
