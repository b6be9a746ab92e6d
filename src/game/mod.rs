pub mod board;
pub mod registry;
pub mod rules;
pub mod state;

pub use board::Board;
pub use registry::{GameRegistry, SharedGame};
pub use rules::Outcome;
pub use state::{Game, Joined, Seat};
