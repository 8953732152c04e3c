//! Types for sending messages via the Cloud API.

use serde::{Deserialize, Serialize};

/// Request body for a text message.
#[derive(Debug, Clone, Serialize)]
pub struct TextMessageRequest {
    /// Always "whatsapp".
    pub messaging_product: &'static str,
    /// Always "individual".
    pub recipient_type: &'static str,
    /// Recipient phone number.
    pub to: String,
    /// Message type, "text".
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Text payload.
    pub text: TextBody,
}

impl TextMessageRequest {
    /// Create a text message request.
    pub fn new(to: impl Into<String>, body: impl Into<String>, preview_url: bool) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to: to.into(),
            kind: "text",
            text: TextBody {
                preview_url,
                body: body.into(),
            },
        }
    }
}

/// Text payload of an outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct TextBody {
    /// Whether WhatsApp should render a link preview.
    pub preview_url: bool,
    /// The message text.
    pub body: String,
}

/// Successful send response.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub messaging_product: Option<String>,

    /// Messages accepted by the API.
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

impl SendResponse {
    /// Interpret a raw API response.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Ids (`wamid.*`) assigned to the accepted messages.
    pub fn message_ids(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.id.as_str()).collect()
    }
}

/// A message accepted by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    /// WhatsApp message id.
    pub id: String,
}

/// Graph API error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorResponse {
    pub error: GraphError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}
