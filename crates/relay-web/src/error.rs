//! Error types for the relay HTTP server.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay::RelayError;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// Relay error (validation, upstream, ingestion, storage).
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Storage error outside the relay.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Request body could not be read.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Webhook verification failed.
    #[error("Verification failed")]
    Verification,
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::Relay(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            WebError::Relay(err) => {
                tracing::error!("Relay error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Verification => {
                tracing::warn!("Webhook verification failed");
                StatusCode::FORBIDDEN
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for route handlers.
pub type Result<T> = std::result::Result<T, WebError>;
