//! Error types for the task API
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// Every error response rendered by the API has the body
/// `{"error": <message>}`; the variant only selects the status code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request did not carry a valid session (401)
    #[error("Não autenticado com GitHub")]
    Unauthorized,

    /// Malformed input rejected by the task store (400)
    #[error("{0}")]
    Validation(String),

    /// Task store could not locate the record (404)
    #[error("{0}")]
    NotFound(String),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    ///
    /// The message is a generic, operation-specific text; the original
    /// error has already been logged before this variant is built.
    #[error("{0}")]
    Internal(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Maps each error variant to its status code and the uniform
    /// `{"error": ...}` JSON body.
    fn into_response(self) -> Response {
        use axum::Json;

        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
