//! Message list routes.

use axum::extract::State;
use axum::Json;
use database::Message;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// All stored messages.
#[derive(Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

/// Acknowledgement for a clear.
#[derive(Serialize)]
pub struct ClearResponse {
    pub ok: bool,
    pub removed: u64,
}

/// List every stored message. Clients sort by timestamp themselves.
pub async fn list(State(state): State<AppState>) -> Result<Json<MessagesResponse>> {
    let messages = state.relay.messages().await?;
    Ok(Json(MessagesResponse { messages }))
}

/// Delete every stored message.
pub async fn clear(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let removed = state.relay.clear().await?;
    Ok(Json(ClearResponse { ok: true, removed }))
}
