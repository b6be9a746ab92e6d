use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::ServiceResult,
    game::GameRegistry,
    models::{GameId, Symbol, UserId},
};

/// A user's participation in one game as one symbol. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSession {
    pub id: String,
    pub game_id: GameId,
    pub symbol: Symbol,
    pub user_id: UserId,
}

impl PlayerSession {
    pub(crate) fn new(game_id: GameId, symbol: Symbol, user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            game_id,
            symbol,
            user_id,
        }
    }

    /// Submit a move at `(x, y)` for this session's symbol
    pub fn make_move(&self, registry: &GameRegistry, x: usize, y: usize) -> ServiceResult<()> {
        registry.make_move(self, x, y)
    }
}

/// Player sessions by id, for the move and subscribe paths
#[derive(Default)]
pub struct PlayerSessionDirectory {
    sessions: DashMap<String, Arc<PlayerSession>>,
}

impl PlayerSessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: PlayerSession) -> Arc<PlayerSession> {
        let session = Arc::new(session);
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    pub fn get(&self, player_session_id: &str) -> Option<Arc<PlayerSession>> {
        self.sessions.get(player_session_id).map(|s| s.value().clone())
    }
}
