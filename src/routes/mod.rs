pub mod api;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/registerUser", post(api::register_user))
        .route("/login", post(api::login))
        .route("/createGame", post(api::create_game))
        .route("/joinGame", post(api::join_game))
        .route("/makeAMove", post(api::make_move))
}
