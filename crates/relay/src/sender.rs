//! The outbound send seam.

use async_trait::async_trait;
use whatsapp_cloud::{CloudError, WhatsAppClient};

/// Something that can deliver a text message to a phone number.
///
/// The relay only records an outgoing message after `send_text` succeeds.
/// The returned JSON is stored as opaque metadata.
#[async_trait]
pub trait TextSender: Send + Sync {
    /// Send `body` to `to`.
    async fn send_text(
        &self,
        to: &str,
        body: &str,
        preview_url: bool,
    ) -> Result<serde_json::Value, CloudError>;

    /// Human readable name, for logs.
    fn name(&self) -> &str;
}

#[async_trait]
impl TextSender for WhatsAppClient {
    async fn send_text(
        &self,
        to: &str,
        body: &str,
        preview_url: bool,
    ) -> Result<serde_json::Value, CloudError> {
        WhatsAppClient::send_text(self, to, body, preview_url).await
    }

    fn name(&self) -> &str {
        "whatsapp-cloud"
    }
}
