use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a live game, chosen by its creator
pub type GameId = String;

/// One of the two marks a player can hold in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Both symbols, in seat order
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    /// Symbol that moves first once both seats are filled
    pub const FIRST: Symbol = Symbol::X;

    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub(crate) fn seat_index(self) -> usize {
        match self {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => f.write_str("X"),
            Symbol::O => f.write_str("O"),
        }
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Symbol::X),
            "O" | "o" => Ok(Symbol::O),
            other => Err(format!("unknown symbol '{}'", other)),
        }
    }
}

/// A single board cell
pub type Cell = Option<Symbol>;

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "winner", rename_all = "snake_case")]
pub enum GameStatus {
    /// Fewer than two seats bound
    WaitingForPlayers,
    /// Both seats bound, moves accepted
    InProgress,
    /// Terminal: a line was completed by this symbol
    Won(Symbol),
    /// Terminal: board full with no line
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Draw)
    }
}

/// Events published to both player sessions of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    /// Both seats are bound and `first` holds the turn
    GameStarted { first: Symbol },
    MoveMade { symbol: Symbol, x: usize, y: usize },
    GameWon { symbol: Symbol },
    GameDraw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_other_alternates() {
        assert_eq!(Symbol::X.other(), Symbol::O);
        assert_eq!(Symbol::O.other(), Symbol::X);
        assert_eq!(Symbol::FIRST, Symbol::X);
    }

    #[test]
    fn test_symbol_parse() {
        assert_eq!("X".parse::<Symbol>(), Ok(Symbol::X));
        assert_eq!("o".parse::<Symbol>(), Ok(Symbol::O));
        assert!("Z".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(GameEvent::MoveMade {
            symbol: Symbol::O,
            x: 2,
            y: 1,
        })
        .unwrap();
        assert_eq!(json["event"], "move-made");
        assert_eq!(json["symbol"], "O");
        assert_eq!(json["x"], 2);

        let json = serde_json::to_value(GameEvent::GameDraw).unwrap();
        assert_eq!(json["event"], "game-draw");
    }
}
