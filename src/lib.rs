pub mod accounts;
pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod notifier;
pub mod routes;
pub mod service;
pub mod sessions;
pub mod websocket;

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use accounts::{AccountRepository, FileAccountRepository, InMemoryAccountRepository};
use config::{AccountStore, Config};
use notifier::EventNotifier;
use service::GameService;

pub use error::{JoinError, MoveError, ServiceError, ServiceResult};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub service: GameService,
}

impl AppState {
    /// Build the service stack described by `config`
    pub async fn from_config(config: Config) -> Result<Self> {
        let accounts: Arc<dyn AccountRepository> = match config.accounts.store {
            AccountStore::Memory => Arc::new(InMemoryAccountRepository::new()),
            AccountStore::File => {
                Arc::new(FileAccountRepository::open(&config.accounts.path).await?)
            }
        };
        let notifier = Arc::new(EventNotifier::new(config.events.channel_capacity));

        Ok(Self {
            service: GameService::new(accounts, notifier),
            config,
        })
    }
}

/// Full HTTP + WebSocket application
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(websocket::handle_websocket))
        .merge(routes::create_routes())
        .nest_service("/public", ServeDir::new(&state.config.server.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
