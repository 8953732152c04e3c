//! Route handlers for the relay server.

pub mod conversations;
pub mod health;
pub mod messages;
pub mod send;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Meta webhook: verification and deliveries
        .route(
            "/api/webhook",
            get(webhook::verify).post(webhook::receive),
        )
        // Operator API
        .route(
            "/api/messages",
            get(messages::list).delete(messages::clear),
        )
        .route("/api/send", post(send::send))
        .route("/api/contacts", get(conversations::contacts))
        .route("/api/conversations/:phone", get(conversations::conversation))
}
