//! Outbound send route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use database::Message;
use relay::SendRequest;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// The stored outgoing message.
#[derive(Serialize)]
pub struct SendResponse {
    pub message: Message,
}

/// Send a text message and return the stored record.
pub async fn send(
    State(state): State<AppState>,
    request: std::result::Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>> {
    let Json(request) = request?;
    let message = state.relay.send(request).await?;
    Ok(Json(SendResponse { message }))
}
