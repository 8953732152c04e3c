//! WhatsApp Cloud API HTTP client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::CloudConfig;
use crate::error::CloudError;
use crate::types::send::{GraphErrorResponse, TextMessageRequest};

/// Client for the WhatsApp Cloud API.
#[derive(Clone)]
pub struct WhatsAppClient {
    http: Client,
    config: CloudConfig,
}

impl WhatsAppClient {
    /// Create a client for the given configuration.
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        if config.phone_number_id.is_empty() {
            return Err(CloudError::Config("phone number id is empty".to_string()));
        }
        if config.access_token.is_empty() {
            return Err(CloudError::Config("access token is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(CloudError::Http)?;

        Ok(Self { http, config })
    }

    /// Send a text message.
    ///
    /// Returns the raw API response; callers treat it as opaque.
    pub async fn send_text(
        &self,
        to: &str,
        body: &str,
        preview_url: bool,
    ) -> Result<serde_json::Value, CloudError> {
        let request = TextMessageRequest::new(to, body, preview_url);
        self.post_message(&request).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    async fn post_message(
        &self,
        request: &TextMessageRequest,
    ) -> Result<serde_json::Value, CloudError> {
        let url = self.config.messages_url();
        debug!(to = %request.to, "POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await
            .map_err(CloudError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Cloud API rejected message");

            return Err(match serde_json::from_str::<GraphErrorResponse>(&body) {
                Ok(parsed) => CloudError::Api {
                    status: status.as_u16(),
                    code: parsed.error.code,
                    message: parsed.error.message,
                },
                Err(_) => CloudError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        response.json().await.map_err(CloudError::Http)
    }
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("config", &self.config)
            .finish()
    }
}
