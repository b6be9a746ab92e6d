pub mod game;
pub mod user;

pub use game::{
    // Identity and seats
    GameId, Symbol,
    // Lifecycle and board cells
    Cell, GameStatus,
    // Events pushed to player sessions
    GameEvent,
};
pub use user::{Account, UserId};
