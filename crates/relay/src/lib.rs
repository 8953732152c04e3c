//! Message ingestion and conversation views for the WhatsApp relay.
//!
//! Two producers feed one store:
//!
//! - webhook deliveries, decomposed into one stored message per leaf event
//! - operator sends, recorded only after the Cloud API accepts them
//!
//! The [`conversation`] module derives contact lists and per-phone threads
//! from the flat store on every read.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use database::Database;
//! use relay::{Relay, SendRequest};
//! use whatsapp_cloud::{CloudConfig, WhatsAppClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite::memory:").await?;
//! db.migrate().await?;
//! let client = WhatsAppClient::new(CloudConfig::new("PHONE_ID", "TOKEN"))?;
//! let relay = Relay::new(db, Arc::new(client));
//!
//! relay.send(SendRequest::new("15551234567", "Hello!")).await?;
//! for contact in relay.contacts().await? {
//!     println!("{}: {}", contact.phone, contact.last_text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod conversation;
pub mod error;
pub mod event;
pub mod ingest;
pub mod mock;
pub mod outbound;
pub mod sender;
pub mod service;

pub use conversation::ContactSummary;
pub use error::{RelayError, Result};
pub use event::InboundEvent;
pub use ingest::IngestReport;
pub use outbound::SendRequest;
pub use sender::TextSender;
pub use service::Relay;
