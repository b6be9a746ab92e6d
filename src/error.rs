use thiserror::Error;

/// Why a join request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("symbol already taken")]
    SymbolTaken,
    #[error("user already joined this game")]
    AlreadyJoined,
    #[error("game not found")]
    GameNotFound,
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is not in progress")]
    NotInProgress,
    #[error("not this player's turn")]
    NotYourTurn,
    #[error("cell already occupied")]
    CellOccupied,
    #[error("coordinates out of range")]
    OutOfRange,
}

/// Failures returned by the game service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("account already present")]
    AccountAlreadyPresent,
    #[error("login failed")]
    LoginFailed,
    #[error("game already present")]
    GameAlreadyPresent,
    #[error("game not found")]
    GameNotFound,
    #[error("invalid join: {0}")]
    InvalidJoin(#[from] JoinError),
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),
    #[error("user session not found")]
    UserSessionNotFound,
    #[error("player session not found")]
    PlayerSessionNotFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
