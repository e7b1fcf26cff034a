// Domain Layer - Pure entities

pub mod event;

pub use event::{Event, EventId};
