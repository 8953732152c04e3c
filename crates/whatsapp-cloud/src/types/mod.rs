//! Wire types for the WhatsApp Cloud API.

pub mod send;
pub mod webhook;

pub use send::{SendResponse, SentMessage, TextBody, TextMessageRequest};
pub use webhook::{
    ChangeValue, TextContent, ValueMetadata, WebhookChange, WebhookEntry, WebhookMessage,
    WebhookPayload, WebhookStatus,
};
