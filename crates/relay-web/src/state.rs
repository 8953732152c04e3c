//! Application state shared across handlers.

use std::sync::Arc;

use relay::Relay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Ingestion, sending and conversation views.
    pub relay: Relay,
    /// Expected `hub.verify_token`.
    pub verify_token: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(relay: Relay, verify_token: impl Into<Arc<str>>) -> Self {
        Self {
            relay,
            verify_token: verify_token.into(),
        }
    }
}
