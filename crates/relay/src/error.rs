//! Error types for relay operations.

use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while ingesting or sending messages.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required input field was missing. Nothing was sent or stored.
    #[error("{0}")]
    Validation(String),

    /// The send collaborator failed. Nothing was stored.
    #[error("send failed: {0}")]
    Upstream(String),

    /// A webhook delivery did not have the expected shape.
    #[error("invalid webhook payload: {0}")]
    Ingestion(#[from] serde_json::Error),

    /// The message store failed.
    #[error("storage error: {0}")]
    Storage(#[from] DatabaseError),
}

impl RelayError {
    /// Whether the caller, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::Validation(_))
    }
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
