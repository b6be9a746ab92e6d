use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ServiceError, models::Symbol, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub session_id: String,
    pub game_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub session_id: String,
    pub game_id: String,
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_session_id: String,
    pub x: Coordinate,
    pub y: Coordinate,
}

/// Browser clients send coordinates either as numbers or as numeric strings.
/// Any other JSON value is kept so the move can be refused as invalid.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(i64),
    Text(String),
    Other(Value),
}

impl Coordinate {
    /// Board index, or `None` when the value cannot be one
    pub fn index(&self) -> Option<usize> {
        match self {
            Coordinate::Number(n) => usize::try_from(*n).ok(),
            Coordinate::Text(s) => s.trim().parse().ok(),
            Coordinate::Other(_) => None,
        }
    }
}

fn not_found(e: ServiceError) -> StatusCode {
    tracing::warn!("Request refused: {}", e);
    StatusCode::NOT_FOUND
}

/// Register a new account
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Json<Value> {
    tracing::info!("RegisterUser request for {}", payload.user_name);

    match state
        .service
        .register_user(&payload.user_name, &payload.password)
        .await
    {
        Ok(_) => Json(json!({ "result": "ok" })),
        Err(e) => Json(json!({ "result": "error", "error": e.to_string() })),
    }
}

/// Log in and open a user session
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Json<Value> {
    tracing::info!("Login request for {}", payload.user_name);

    match state
        .service
        .login(&payload.user_name, &payload.password)
        .await
    {
        Ok(session) => Json(json!({ "result": "ok", "sessionId": session.session_id })),
        Err(e) => Json(json!({ "result": "login-failed", "error": e.to_string() })),
    }
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<Value>, StatusCode> {
    tracing::info!("CreateGame request for {}", payload.game_id);

    let session = state
        .service
        .user_session(&payload.session_id)
        .map_err(not_found)?;

    match state.service.create_game(&payload.game_id) {
        Ok(()) => {
            tracing::info!("User {} created game {}", session.user_id, payload.game_id);
            Ok(Json(json!({ "result": "ok" })))
        }
        Err(ServiceError::GameAlreadyPresent) => Ok(Json(
            json!({ "result": "error", "error": "game-already-present" }),
        )),
        Err(e) => {
            tracing::error!("Unexpected create game failure: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn join_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<JoinGameRequest>,
) -> Result<Json<Value>, StatusCode> {
    tracing::info!(
        "JoinGame request for {} as {}",
        payload.game_id,
        payload.symbol
    );

    let session = state
        .service
        .user_session(&payload.session_id)
        .map_err(not_found)?;
    let symbol: Symbol = payload.symbol.parse().map_err(|e| {
        tracing::warn!("Bad join request: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    match state
        .service
        .join_game(session.user_id.clone(), &payload.game_id, symbol, None)
    {
        Ok(player_session) => Ok(Json(
            json!({ "result": "ok", "playerSessionId": player_session.id }),
        )),
        Err(e) => {
            tracing::warn!("Join refused for {}: {}", session.user_id, e);
            Ok(Json(json!({ "result": "error", "error": e.to_string() })))
        }
    }
}

pub async fn make_move(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<Value>, StatusCode> {
    tracing::info!(
        "MakeAMove request from {}: {:?}, {:?}",
        payload.player_session_id,
        payload.x,
        payload.y
    );

    let player_session = state
        .service
        .player_session(&payload.player_session_id)
        .map_err(not_found)?;

    let (Some(x), Some(y)) = (payload.x.index(), payload.y.index()) else {
        return Ok(Json(json!({ "result": "invalid-move" })));
    };

    match player_session.make_move(state.service.games(), x, y) {
        Ok(()) => Ok(Json(json!({ "result": "accepted" }))),
        Err(ServiceError::InvalidMove(reason)) => {
            tracing::debug!("Move refused: {}", reason);
            Ok(Json(json!({ "result": "invalid-move" })))
        }
        Err(e) => {
            tracing::error!("Unexpected move failure: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
