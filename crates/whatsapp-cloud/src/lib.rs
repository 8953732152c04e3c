//! WhatsApp Business Cloud API client library.
//!
//! This crate provides:
//!
//! - Typed webhook delivery payloads (`entry` → `changes` → `value`)
//! - Webhook subscription verification (`hub.mode` / `hub.verify_token`)
//! - Sending text messages through the Graph API
//!
//! # Example
//!
//! ```no_run
//! use whatsapp_cloud::{CloudConfig, WhatsAppClient};
//!
//! # async fn example() -> Result<(), whatsapp_cloud::CloudError> {
//! let config = CloudConfig::new("123456789", "EAAG...");
//! let client = WhatsAppClient::new(config)?;
//!
//! let response = client.send_text("15551234567", "Hello!", false).await?;
//! println!("API response: {}", response);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub mod verify;

pub use client::WhatsAppClient;
pub use config::CloudConfig;
pub use error::CloudError;
pub use types::*;
pub use verify::verify_subscription;
