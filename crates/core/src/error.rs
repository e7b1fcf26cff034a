// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type.
///
/// `Store` covers connectivity and transaction failures; the store adapter
/// always rolls back before surfacing one. `Timeout` is distinct from
/// `Store` so callers can tell a slow worker from a broken database.
#[derive(Error, Debug)]
pub enum Error {
    #[error("store error: {0}")]
    Store(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Machine-readable kind, stable across releases. Error messages are not.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::NotFound(_) => "not_found",
            Error::InvalidInput(_) => "invalid_input",
            Error::Timeout(_) => "timeout",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
            Error::Internal(_) => "internal",
        }
    }
}

/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;

// Note: sqlx::Error conversion is handled in infra-sqlite
// by converting to Error::Store / Error::Internal (orphan rules)
