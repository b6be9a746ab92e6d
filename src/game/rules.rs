use crate::{
    game::board::Board,
    models::Symbol,
};

/// The 8 winning lines as `(x, y)` triples
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Columns
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// Result of evaluating a board after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won(Symbol),
    Draw,
}

/// Symbol owning a complete line, if any
pub fn winner(board: &Board) -> Option<Symbol> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|(x, y)| board.get(x, y).flatten());
        match a {
            Some(symbol) if b == a && c == a => Some(symbol),
            _ => None,
        }
    })
}

/// Classify the board: a completed line wins, otherwise a full board draws
pub fn evaluate(board: &Board) -> Outcome {
    match winner(board) {
        Some(symbol) => Outcome::Won(symbol),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::Ongoing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(usize, usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(x, y, symbol) in cells {
            board.place(x, y, symbol).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for symbol in Symbol::ALL {
            for line in LINES {
                let cells: Vec<_> = line.iter().map(|&(x, y)| (x, y, symbol)).collect();
                let board = board_with(&cells);
                assert_eq!(
                    evaluate(&board),
                    Outcome::Won(symbol),
                    "line {:?} should win for {}",
                    line,
                    symbol
                );
            }
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = board_with(&[
            (0, 0, Symbol::X),
            (1, 0, Symbol::O),
            (2, 0, Symbol::X),
        ]);
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X
        // X O O
        // O X X
        let board = board_with(&[
            (0, 0, Symbol::X),
            (1, 0, Symbol::O),
            (2, 0, Symbol::X),
            (0, 1, Symbol::X),
            (1, 1, Symbol::O),
            (2, 1, Symbol::O),
            (0, 2, Symbol::O),
            (1, 2, Symbol::X),
            (2, 2, Symbol::X),
        ]);
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        // X X X
        // O O X
        // X O O
        let board = board_with(&[
            (0, 0, Symbol::X),
            (1, 0, Symbol::X),
            (2, 0, Symbol::X),
            (0, 1, Symbol::O),
            (1, 1, Symbol::O),
            (2, 1, Symbol::X),
            (0, 2, Symbol::X),
            (1, 2, Symbol::O),
            (2, 2, Symbol::O),
        ]);
        assert_eq!(evaluate(&board), Outcome::Won(Symbol::X));
    }
}
