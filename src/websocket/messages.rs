use serde::{Deserialize, Serialize};

use crate::models::GameEvent;

/// First message a client sends on the socket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub player_session_id: String,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Subscribed {
        #[serde(rename = "playerSessionId")]
        player_session_id: String,
    },
    GameEvent {
        event: GameEvent,
    },
    Error {
        message: String,
    },
}
