//! API Error Type
//!
//! Maps core errors to HTTP statuses. The body always carries a
//! machine-readable kind next to the human message; message text is not a
//! stable surface, the kind is.

use axum::{http::StatusCode, response::IntoResponse, Json};
use sequent_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// Top-level API error shared by all route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "invalid_input",
            ApiError::Core(e) => e.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e {
                CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                // A sync submit that outlives its deadline is a server-side
                // failure from the client's point of view.
                CoreError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        let payload = json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        });

        (status, Json(payload)).into_response()
    }
}
