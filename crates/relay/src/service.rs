//! The relay service tying the store, ingestion and sending together.

use std::sync::Arc;

use database::{message, Database, Message, NewMessage};
use serde_json::json;
use tracing::{debug, info, warn};
use whatsapp_cloud::{SendResponse, WebhookPayload};

use crate::conversation::{self, ContactSummary};
use crate::error::{RelayError, Result};
use crate::ingest::{decompose, parse_delivery, IngestReport};
use crate::outbound::SendRequest;
use crate::sender::TextSender;

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Shared handle used by every request handler.
#[derive(Clone)]
pub struct Relay {
    db: Database,
    sender: Arc<dyn TextSender>,
}

impl Relay {
    /// Create a relay over an already migrated database.
    pub fn new(db: Database, sender: Arc<dyn TextSender>) -> Self {
        Self { db, sender }
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Ingest one raw webhook delivery.
    pub async fn ingest(&self, body: &[u8]) -> Result<IngestReport> {
        let payload = parse_delivery(body).inspect_err(|err| {
            warn!(error = %err, "Rejecting webhook delivery");
        })?;
        self.ingest_payload(&payload, now_millis()).await
    }

    /// Ingest an already parsed delivery.
    ///
    /// Events are appended one at a time in payload order. A storage failure
    /// stops the delivery; events appended before it stay stored.
    pub async fn ingest_payload(
        &self,
        payload: &WebhookPayload,
        now_ms: i64,
    ) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for event in decompose(payload, now_ms) {
            if event.is_status() {
                report.statuses += 1;
            } else {
                report.messages += 1;
            }
            debug!(
                phone = %event.phone(),
                upstream_id = ?event.upstream_id(),
                "Appending webhook event"
            );

            let stored = message::append_message(self.db.pool(), &event.into_new_message()).await?;
            report.stored.push(stored.id);
        }

        info!(
            messages = report.messages,
            statuses = report.statuses,
            "Ingested webhook delivery"
        );
        Ok(report)
    }

    /// Send a text message and record it once the transport accepts it.
    pub async fn send(&self, request: SendRequest) -> Result<Message> {
        let (to, body, preview_url) = request.validate()?;

        info!(to = %to, sender = self.sender.name(), "Sending text message");
        let api_response = self
            .sender
            .send_text(to, body, preview_url)
            .await
            .map_err(|err| {
                warn!(to = %to, error = %err, "Send failed");
                RelayError::Upstream(err.to_string())
            })?;

        match SendResponse::from_value(&api_response) {
            Ok(response) => info!(
                to = %to,
                message_ids = ?response.message_ids(),
                "Text message accepted"
            ),
            Err(err) => warn!(to = %to, error = %err, "Unrecognized send response"),
        }

        let candidate = NewMessage::outgoing(
            to,
            body,
            now_millis(),
            json!({ "apiResponse": api_response }),
        );
        Ok(message::append_message(self.db.pool(), &candidate).await?)
    }

    /// All stored messages, in store order.
    pub async fn messages(&self) -> Result<Vec<Message>> {
        Ok(message::list_messages(self.db.pool()).await?)
    }

    /// Delete every message. Returns how many were removed.
    pub async fn clear(&self) -> Result<u64> {
        Ok(message::clear_messages(self.db.pool()).await?)
    }

    /// Contacts, most recently active first.
    pub async fn contacts(&self) -> Result<Vec<ContactSummary>> {
        let messages = self.messages().await?;
        Ok(conversation::contact_summaries(&messages))
    }

    /// The conversation with `phone`, oldest first.
    pub async fn conversation(&self, phone: &str) -> Result<Vec<Message>> {
        let messages = self.messages().await?;
        Ok(conversation::conversation(&messages, phone))
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("db", &self.db)
            .field("sender", &self.sender.name())
            .finish()
    }
}
