// Port Layer - Interfaces for external dependencies

pub mod event_store;
pub mod result_source;
pub mod time_provider;

// Re-exports
pub use event_store::EventStore;
pub use result_source::{ResultSource, WordPool, FALLBACK_VALUE};
pub use time_provider::{SystemTimeProvider, TimeProvider};
