use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttt_game_service::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttt_game_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("TTT Game Service initializing...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let state = Arc::new(AppState::from_config(config.clone()).await?);
    tracing::info!("Account store ready ({:?})", config.accounts.store);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("TTT Game Service ready on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
