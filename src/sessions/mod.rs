pub mod player;
pub mod user;

pub use player::{PlayerSession, PlayerSessionDirectory};
pub use user::{SessionDirectory, UserSession};
