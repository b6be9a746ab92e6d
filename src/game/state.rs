use serde::Serialize;

use crate::{
    error::{JoinError, MoveError},
    game::{
        board::Board,
        rules::{self, Outcome},
    },
    models::{GameEvent, GameId, GameStatus, Symbol, UserId},
    sessions::PlayerSession,
};

/// A user bound to one symbol of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub user_id: UserId,
    pub player_session_id: String,
}

/// Result of a successful join
#[derive(Debug, Clone)]
pub struct Joined {
    pub session: PlayerSession,
    /// True when this join filled the last seat and started the game
    pub started: bool,
}

/// One match. Mutated only through [`Game::join`] and [`Game::make_move`],
/// both of which leave the game untouched when they return an error.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    id: GameId,
    board: Board,
    seats: [Option<Seat>; 2],
    turn: Symbol,
    status: GameStatus,
    move_count: usize,
}

impl Game {
    pub fn new(id: impl Into<GameId>) -> Self {
        Self {
            id: id.into(),
            board: Board::new(),
            seats: [None, None],
            turn: Symbol::FIRST,
            status: GameStatus::WaitingForPlayers,
            move_count: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Symbol {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn seat(&self, symbol: Symbol) -> Option<&Seat> {
        self.seats[symbol.seat_index()].as_ref()
    }

    /// Player session ids of every bound seat, X first
    pub fn player_session_ids(&self) -> impl Iterator<Item = &str> {
        self.seats
            .iter()
            .flatten()
            .map(|seat| seat.player_session_id.as_str())
    }

    /// Bind `user_id` to `symbol`, starting the game when both seats are filled
    pub fn join(&mut self, user_id: UserId, symbol: Symbol) -> Result<Joined, JoinError> {
        if self.seats.iter().flatten().any(|seat| seat.user_id == user_id) {
            return Err(JoinError::AlreadyJoined);
        }
        if self.seat(symbol).is_some() {
            return Err(JoinError::SymbolTaken);
        }

        let session = PlayerSession::new(self.id.clone(), symbol, user_id.clone());
        self.seats[symbol.seat_index()] = Some(Seat {
            user_id,
            player_session_id: session.id.clone(),
        });

        let started = self.status == GameStatus::WaitingForPlayers
            && self.seats.iter().all(Option::is_some);
        if started {
            self.status = GameStatus::InProgress;
            self.turn = Symbol::FIRST;
        }

        Ok(Joined { session, started })
    }

    /// Apply a move by `symbol` at `(x, y)` and return the events it produced:
    /// `MoveMade`, followed by `GameWon`/`GameDraw` when the move ends the game.
    pub fn make_move(
        &mut self,
        symbol: Symbol,
        x: usize,
        y: usize,
    ) -> Result<Vec<GameEvent>, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::NotInProgress);
        }
        if symbol != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        self.board.place(x, y, symbol)?;
        self.move_count += 1;

        let mut events = vec![GameEvent::MoveMade { symbol, x, y }];
        match rules::evaluate(&self.board) {
            Outcome::Won(winner) => {
                self.status = GameStatus::Won(winner);
                events.push(GameEvent::GameWon { symbol: winner });
            }
            Outcome::Draw => {
                self.status = GameStatus::Draw;
                events.push(GameEvent::GameDraw);
            }
            Outcome::Ongoing => self.turn = symbol.other(),
        }

        Ok(events)
    }
}
