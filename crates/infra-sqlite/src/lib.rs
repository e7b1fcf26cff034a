// Sequent Infrastructure - SQLite Adapter
// Implements the EventStore port on sqlx/SQLite

mod connection;
mod event_store;
mod migration;

pub use connection::create_pool;
pub use event_store::SqliteEventStore;
pub use migration::run_migrations;

// Note: sqlx::Error conversion lives in event_store helpers; orphan rules
// prevent a From<sqlx::Error> impl for the core error type here.
