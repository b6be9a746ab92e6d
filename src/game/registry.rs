use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    error::{JoinError, ServiceError, ServiceResult},
    game::state::Game,
    models::{GameEvent, GameId, Symbol, UserId},
    notifier::{EventNotifier, EventSender},
    sessions::PlayerSession,
};

/// Handle to a live game. Every read or write of the game goes through its mutex.
pub type SharedGame = Arc<Mutex<Game>>;

/// Process-wide mapping from game id to game.
///
/// The map itself only guards insertion and lookup; seat and move operations
/// run under the owning game's own lock, so unrelated games never contend.
pub struct GameRegistry {
    games: DashMap<GameId, SharedGame>,
    notifier: Arc<EventNotifier>,
}

fn lock(game: &SharedGame) -> MutexGuard<'_, Game> {
    // Game mutations validate before writing, so a panic cannot leave a half-applied move
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameRegistry {
    pub fn new(notifier: Arc<EventNotifier>) -> Self {
        Self {
            games: DashMap::new(),
            notifier,
        }
    }

    pub fn notifier(&self) -> &Arc<EventNotifier> {
        &self.notifier
    }

    /// Insert a fresh game under `id`. Exactly one of any set of concurrent
    /// callers using the same id succeeds.
    pub fn create_game(&self, id: &str) -> ServiceResult<()> {
        match self.games.entry(id.to_string()) {
            Entry::Occupied(_) => Err(ServiceError::GameAlreadyPresent),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(Game::new(id))));
                tracing::info!("Game {} created", id);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, id: &str) -> ServiceResult<SharedGame> {
        self.games
            .get(id)
            .map(|game| game.value().clone())
            .ok_or(ServiceError::GameNotFound)
    }

    /// Copy of the game's current state
    pub fn snapshot(&self, id: &str) -> ServiceResult<Game> {
        let game = self.lookup(id)?;
        let snapshot = lock(&game).clone();
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Bind `user_id` to `symbol` in game `id`.
    ///
    /// `subscriber`, when given, is registered for the new player session
    /// before any event of this join is published.
    pub fn join(
        &self,
        id: &str,
        user_id: UserId,
        symbol: Symbol,
        subscriber: Option<EventSender>,
    ) -> ServiceResult<PlayerSession> {
        let game = self
            .lookup(id)
            .map_err(|_| ServiceError::InvalidJoin(JoinError::GameNotFound))?;
        let mut game = lock(&game);

        let joined = game.join(user_id, symbol)?;
        tracing::info!(
            "User {} joined game {} as {}",
            joined.session.user_id,
            id,
            symbol
        );

        if let Some(sender) = subscriber {
            self.notifier.attach(&joined.session.id, sender);
        }
        if joined.started {
            tracing::info!("Game {} started, {} moves first", id, game.turn());
            self.broadcast(
                &game,
                &[GameEvent::GameStarted {
                    first: game.turn(),
                }],
            );
        }

        Ok(joined.session)
    }

    /// Apply a move for `session` and publish the resulting events to both seats
    pub fn make_move(&self, session: &PlayerSession, x: usize, y: usize) -> ServiceResult<()> {
        let game = self.lookup(&session.game_id)?;
        let mut game = lock(&game);

        let events = game.make_move(session.symbol, x, y)?;
        tracing::debug!(
            "Game {}: {} played ({}, {})",
            session.game_id,
            session.symbol,
            x,
            y
        );
        if game.status().is_terminal() {
            tracing::info!("Game {} over: {:?}", session.game_id, game.status());
        }

        // Published under the game's lock so every seat sees the game's event order
        self.broadcast(&game, &events);
        Ok(())
    }

    fn broadcast(&self, game: &Game, events: &[GameEvent]) {
        for event in events {
            for player_session_id in game.player_session_ids() {
                self.notifier.publish(player_session_id, event);
            }
        }
    }
}
