//! HTTP API Layer
//!
//! Binds the producer and lookup services to the HTTP surface:
//! POST /events (sync), POST /events/async, GET /events, GET /events/{id}.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use router::build_router;
pub use state::AppState;
