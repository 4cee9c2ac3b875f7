//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meal_store::MealStoreError;
use serde_json::json;

/// Machine-readable error codes returned in response bodies.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const MISSING_USER_ID: &str = "missing_user_id";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No user identifier supplied where one is required.
    #[error("Please inform a user id")]
    MissingUserId,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate resource.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage error.
    #[error("Store error: {0}")]
    Store(#[from] MealStoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::MissingUserId => (
                StatusCode::BAD_REQUEST,
                error_codes::MISSING_USER_ID,
                self.to_string(),
            ),
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg.clone())
            }
            ServerError::Conflict(msg) => {
                (StatusCode::CONFLICT, error_codes::CONFLICT, msg.clone())
            }
            ServerError::Store(err) => match err {
                MealStoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, err.to_string())
                }
                MealStoreError::AlreadyExists { .. } => {
                    (StatusCode::CONFLICT, error_codes::CONFLICT, err.to_string())
                }
                MealStoreError::ForeignKeyViolation(_) => (
                    StatusCode::BAD_REQUEST,
                    error_codes::INVALID_REQUEST,
                    err.to_string(),
                ),
                MealStoreError::Database(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    err.to_string(),
                ),
            },
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
