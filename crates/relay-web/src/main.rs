//! HTTP server for the WhatsApp relay.
//!
//! Receives Cloud API webhook deliveries, sends operator replies and serves
//! the stored conversation log to a polling UI.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use database::Database;
use relay::Relay;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use whatsapp_cloud::WhatsAppClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting relay server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Cloud API client for outbound sends
    let client = WhatsAppClient::new(config.cloud.clone())?;
    info!(cloud = ?client.config(), "Cloud API client ready");

    // Build application state
    let relay = Relay::new(db.clone(), Arc::new(client));
    let state = AppState::new(relay, config.verify_token.clone());

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Relay server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
