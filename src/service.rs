use std::sync::Arc;

use crate::{
    accounts::AccountRepository,
    error::{ServiceError, ServiceResult},
    game::{Game, GameRegistry},
    models::{Account, Symbol, UserId},
    notifier::{EventNotifier, EventReceiver, EventSender},
    sessions::{PlayerSession, PlayerSessionDirectory, SessionDirectory, UserSession},
};

/// Entry point for every transport: accounts, sessions, games and moves
pub struct GameService {
    accounts: Arc<dyn AccountRepository>,
    user_sessions: SessionDirectory,
    player_sessions: PlayerSessionDirectory,
    games: GameRegistry,
}

impl GameService {
    pub fn new(accounts: Arc<dyn AccountRepository>, notifier: Arc<EventNotifier>) -> Self {
        Self {
            accounts,
            user_sessions: SessionDirectory::new(),
            player_sessions: PlayerSessionDirectory::new(),
            games: GameRegistry::new(notifier),
        }
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn notifier(&self) -> &Arc<EventNotifier> {
        self.games.notifier()
    }

    pub async fn register_user(&self, user_name: &str, password: &str) -> ServiceResult<Account> {
        let account = Account::new(user_name, password);
        if self.accounts.is_present(user_name).await
            || !self.accounts.add_account(account.clone()).await
        {
            tracing::warn!(
                "Registration refused, account {} already present",
                user_name
            );
            return Err(ServiceError::AccountAlreadyPresent);
        }
        tracing::info!("Registered account {}", user_name);
        Ok(account)
    }

    pub async fn login(&self, user_name: &str, password: &str) -> ServiceResult<Arc<UserSession>> {
        if !self.accounts.is_valid(user_name, password).await {
            tracing::warn!("Login failed for {}", user_name);
            return Err(ServiceError::LoginFailed);
        }
        let session = self.user_sessions.open(UserId::new(user_name));
        tracing::info!("User {} logged in ({})", user_name, session.session_id);
        Ok(session)
    }

    pub fn user_session(&self, session_id: &str) -> ServiceResult<Arc<UserSession>> {
        self.user_sessions
            .get(session_id)
            .ok_or(ServiceError::UserSessionNotFound)
    }

    pub fn player_session(&self, player_session_id: &str) -> ServiceResult<Arc<PlayerSession>> {
        self.player_sessions
            .get(player_session_id)
            .ok_or(ServiceError::PlayerSessionNotFound)
    }

    pub fn create_game(&self, game_id: &str) -> ServiceResult<()> {
        self.games.create_game(game_id)
    }

    /// Current state of a game
    pub fn game(&self, game_id: &str) -> ServiceResult<Game> {
        self.games.snapshot(game_id)
    }

    pub fn join_game(
        &self,
        user_id: UserId,
        game_id: &str,
        symbol: Symbol,
        subscriber: Option<EventSender>,
    ) -> ServiceResult<Arc<PlayerSession>> {
        let session = self.games.join(game_id, user_id, symbol, subscriber)?;
        Ok(self.player_sessions.insert(session))
    }

    pub fn make_move(&self, player_session_id: &str, x: usize, y: usize) -> ServiceResult<()> {
        let session = self.player_session(player_session_id)?;
        session.make_move(&self.games, x, y)
    }

    /// Start receiving the events of an existing player session
    pub fn subscribe(&self, player_session_id: &str) -> ServiceResult<EventReceiver> {
        let session = self.player_session(player_session_id)?;
        Ok(self.notifier().subscribe(&session.id))
    }
}
