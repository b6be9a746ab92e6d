use serde::{Deserialize, Serialize};

use crate::{
    error::MoveError,
    models::{Cell, Symbol},
};

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// A 3x3 grid, indexed by column `x` and row `y`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at `(x, y)`, or `None` when the coordinates fall outside the board
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Check that `(x, y)` is on the board and still empty
    pub fn check_free(&self, x: usize, y: usize) -> Result<(), MoveError> {
        match self.get(x, y) {
            None => Err(MoveError::OutOfRange),
            Some(Some(_)) => Err(MoveError::CellOccupied),
            Some(None) => Ok(()),
        }
    }

    /// Mark `(x, y)` with `symbol`. Occupied cells are never overwritten.
    pub fn place(&mut self, x: usize, y: usize, symbol: Symbol) -> Result<(), MoveError> {
        self.check_free(x, y)?;
        self.rows[y][x] = Some(symbol);
        Ok(())
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_SIZE * BOARD_SIZE
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        assert!(!board.is_full());
        assert!(board.rows().iter().flatten().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_place_marks_cell() {
        let mut board = Board::new();
        board.place(2, 0, Symbol::X).unwrap();
        assert_eq!(board.get(2, 0), Some(Some(Symbol::X)));
        assert_eq!(board.get(0, 2), Some(None));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut board = Board::new();
        board.place(1, 1, Symbol::X).unwrap();
        assert_eq!(board.place(1, 1, Symbol::O), Err(MoveError::CellOccupied));
        assert_eq!(board.get(1, 1), Some(Some(Symbol::X)));
    }

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.place(3, 0, Symbol::X), Err(MoveError::OutOfRange));
        assert_eq!(board.place(0, 3, Symbol::X), Err(MoveError::OutOfRange));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        let mut symbol = Symbol::X;
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                board.place(x, y, symbol).unwrap();
                symbol = symbol.other();
            }
        }
        assert!(board.is_full());
    }
}
