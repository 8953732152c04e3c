//! Configuration types for whatsapp-cloud.

/// Default Graph API host.
pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com";

/// Default Graph API version.
pub const DEFAULT_API_VERSION: &str = "v21.0";

/// Configuration for the Cloud API client.
#[derive(Clone)]
pub struct CloudConfig {
    /// Graph API host (e.g., "https://graph.facebook.com").
    pub api_base: String,
    /// Graph API version segment (e.g., "v21.0").
    pub api_version: String,
    /// Business phone number id that messages are sent from.
    pub phone_number_id: String,
    /// Bearer token for the Graph API.
    pub access_token: String,
}

impl CloudConfig {
    /// Create a configuration against the public Graph API.
    pub fn new(phone_number_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            phone_number_id: phone_number_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Override the API host, e.g. for a local mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Get the messages endpoint URL.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.api_version,
            self.phone_number_id
        )
    }
}

// The access token stays out of logs.
impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("phone_number_id", &self.phone_number_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let config = CloudConfig::new("1234", "token");
        assert_eq!(
            config.messages_url(),
            "https://graph.facebook.com/v21.0/1234/messages"
        );

        let config = config
            .with_api_base("http://127.0.0.1:9000/")
            .with_api_version("v19.0");
        assert_eq!(config.messages_url(), "http://127.0.0.1:9000/v19.0/1234/messages");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = CloudConfig::new("1234", "secret-token");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
