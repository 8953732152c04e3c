//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub messages: i64,
}

/// Health check endpoint. Also proves the store is reachable.
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>> {
    let messages = database::message::count_messages(state.relay.database().pool()).await?;
    Ok(Json(Health {
        status: "ok".to_string(),
        messages,
    }))
}
