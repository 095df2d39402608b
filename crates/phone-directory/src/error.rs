//! Error types for the directory service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Directory error types.
///
/// Every variant maps to its own HTTP status and code: callers can always
/// tell bad input from a missing entry, a duplicate, or an unreachable
/// store.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Address must not be empty")]
    EmptyAddress,

    #[error("Phone number not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry for phone number: {0}")]
    Duplicate(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            DirectoryError::InvalidPhoneNumber(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PHONE_NUMBER")
            }
            DirectoryError::EmptyAddress => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_ADDRESS"),
            DirectoryError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DirectoryError::Duplicate(_) => (StatusCode::CONFLICT, "DUPLICATE_ENTRY"),
            DirectoryError::Unavailable(msg) => {
                error!(error = %msg, "Store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<redis::RedisError> for DirectoryError {
    fn from(e: redis::RedisError) -> Self {
        DirectoryError::Unavailable(e.to_string())
    }
}
