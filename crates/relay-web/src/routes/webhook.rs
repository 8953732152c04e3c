//! Meta webhook routes.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WebError};
use crate::state::AppState;

/// Verification query parameters.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Delivery acknowledgement.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
    pub stored: usize,
}

/// Answer Meta's subscription check by echoing the challenge.
pub async fn verify(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<impl IntoResponse> {
    let challenge = whatsapp_cloud::verify_subscription(
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge.as_deref(),
        &state.verify_token,
    )
    .map_err(|_| WebError::Verification)?;

    tracing::info!("Webhook subscription verified");
    Ok(([(header::CONTENT_TYPE, "text/plain")], challenge))
}

/// Receive a webhook delivery.
pub async fn receive(State(state): State<AppState>, body: Bytes) -> Result<Json<WebhookResponse>> {
    let report = state.relay.ingest(&body).await?;
    Ok(Json(WebhookResponse {
        ok: true,
        stored: report.stored.len(),
    }))
}
