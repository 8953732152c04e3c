//! Database models.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Placeholder phone used when a source payload does not name a counterparty.
pub const UNKNOWN_PHONE: &str = "unknown";

/// Which side of the conversation produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Direction {
    /// Delivered to us by a webhook.
    Incoming,
    /// Sent by the operator through the Cloud API.
    Outgoing,
}

impl Direction {
    /// Lowercase name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message that has not been stored yet.
///
/// The store assigns the id on append; callers never choose one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Incoming or outgoing.
    pub direction: Direction,
    /// Counterparty phone number, the conversation key.
    pub phone: String,
    /// Human readable body or a synthesized placeholder.
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Reserved for delivery tracking; ingestion leaves it empty.
    pub status: Option<String>,
    /// Raw payload or API response, never interpreted.
    pub metadata: serde_json::Value,
}

impl NewMessage {
    /// Build an incoming message.
    pub fn incoming(
        phone: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            direction: Direction::Incoming,
            phone: phone.into(),
            text: text.into(),
            timestamp,
            status: None,
            metadata,
        }
    }

    /// Build an outgoing message.
    pub fn outgoing(
        phone: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            direction: Direction::Outgoing,
            ..Self::incoming(phone, text, timestamp, metadata)
        }
    }
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Store-assigned UUID.
    pub id: String,
    /// Incoming or outgoing.
    pub direction: Direction,
    /// Counterparty phone number.
    pub phone: String,
    /// Message body.
    pub text: String,
    /// Milliseconds since the Unix epoch; the ordering key for display.
    pub timestamp: i64,
    /// Optional delivery status.
    pub status: Option<String>,
    /// Opaque auxiliary data.
    #[sqlx(json)]
    pub metadata: serde_json::Value,
}
