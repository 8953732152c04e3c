//! Outbound send requests.

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Operator request to send a text message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    /// Recipient phone number.
    #[serde(default)]
    pub to: Option<String>,
    /// Message text.
    #[serde(default)]
    pub body: Option<String>,
    /// Ask WhatsApp to render link previews.
    #[serde(default)]
    pub preview_url: Option<bool>,
}

impl SendRequest {
    /// Create a request without link previews.
    pub fn new(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: Some(to.into()),
            body: Some(body.into()),
            preview_url: None,
        }
    }

    /// Check required fields and return `(to, body, preview_url)`.
    pub fn validate(&self) -> Result<(&str, &str, bool)> {
        match (self.to.as_deref(), self.body.as_deref()) {
            (Some(to), Some(body)) if !to.is_empty() && !body.is_empty() => {
                Ok((to, body, self.preview_url.unwrap_or(false)))
            }
            _ => Err(RelayError::Validation(
                "Missing recipient phone number or body".to_string(),
            )),
        }
    }
}
