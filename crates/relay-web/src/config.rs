//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use whatsapp_cloud::config::{DEFAULT_API_BASE, DEFAULT_API_VERSION};
use whatsapp_cloud::CloudConfig;

/// Relay server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Token Meta must present when verifying the webhook.
    pub verify_token: String,
    /// Cloud API settings for outbound sends.
    pub cloud: CloudConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `RELAY_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:whatsapp-relay.db?mode=rwc` |
    /// | `WHATSAPP_VERIFY_TOKEN` | Webhook verification token | (required) |
    /// | `WHATSAPP_ACCESS_TOKEN` | Graph API bearer token | (required) |
    /// | `WHATSAPP_PHONE_NUMBER_ID` | Sending phone number id | (required) |
    /// | `WHATSAPP_API_VERSION` | Graph API version | `v21.0` |
    /// | `WHATSAPP_API_BASE` | Graph API host | `https://graph.facebook.com` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("RELAY_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:whatsapp-relay.db?mode=rwc".to_string());

        let verify_token = required("WHATSAPP_VERIFY_TOKEN")?;
        let access_token = required("WHATSAPP_ACCESS_TOKEN")?;
        let phone_number_id = required("WHATSAPP_PHONE_NUMBER_ID")?;

        let cloud = CloudConfig::new(phone_number_id, access_token)
            .with_api_version(
                env::var("WHATSAPP_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            )
            .with_api_base(
                env::var("WHATSAPP_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            );

        Ok(Self {
            addr,
            database_url,
            verify_token,
            cloud,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid RELAY_ADDR format")]
    InvalidAddr,

    #[error("{0} environment variable is required")]
    Missing(&'static str),
}
