//! In-memory sender for tests and local runs without Cloud API credentials.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use whatsapp_cloud::CloudError;

use crate::sender::TextSender;

/// A send recorded by [`MockSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentText {
    pub to: String,
    pub body: String,
    pub preview_url: bool,
}

/// A sender that records calls and either succeeds or fails on demand.
#[derive(Debug, Clone, Default)]
pub struct MockSender {
    sent: Arc<Mutex<Vec<SentText>>>,
    failure: Option<String>,
}

impl MockSender {
    /// A sender whose calls succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose calls fail with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Calls received so far, including failed ones.
    pub async fn sent(&self) -> Vec<SentText> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl TextSender for MockSender {
    async fn send_text(
        &self,
        to: &str,
        body: &str,
        preview_url: bool,
    ) -> Result<serde_json::Value, CloudError> {
        let mut sent = self.sent.lock().await;
        sent.push(SentText {
            to: to.to_string(),
            body: body.to_string(),
            preview_url,
        });

        match &self.failure {
            Some(message) => Err(CloudError::Status {
                status: 500,
                body: message.clone(),
            }),
            None => Ok(json!({
                "messaging_product": "whatsapp",
                "contacts": [{"input": to, "wa_id": to}],
                "messages": [{"id": format!("wamid.mock.{}", sent.len())}]
            })),
        }
    }

    fn name(&self) -> &str {
        "MockSender"
    }
}
