//! Conversation view routes.

use axum::extract::{Path, State};
use axum::Json;
use database::Message;
use relay::ContactSummary;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Contacts, most recently active first.
#[derive(Serialize)]
pub struct ContactsResponse {
    pub contacts: Vec<ContactSummary>,
}

/// One conversation, oldest message first.
#[derive(Serialize)]
pub struct ConversationResponse {
    pub phone: String,
    pub messages: Vec<Message>,
}

pub async fn contacts(State(state): State<AppState>) -> Result<Json<ContactsResponse>> {
    let contacts = state.relay.contacts().await?;
    Ok(Json(ContactsResponse { contacts }))
}

pub async fn conversation(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<ConversationResponse>> {
    let messages = state.relay.conversation(&phone).await?;
    Ok(Json(ConversationResponse { phone, messages }))
}
