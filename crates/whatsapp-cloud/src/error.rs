//! Error types for whatsapp-cloud.

use thiserror::Error;

/// Errors that can occur when talking to the WhatsApp Cloud API.
#[derive(Debug, Error)]
pub enum CloudError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph API error object returned with a non-success status.
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// Non-success status without a recognizable error body.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Webhook subscription verification failed.
    #[error("Verification failed")]
    Verification,
}
