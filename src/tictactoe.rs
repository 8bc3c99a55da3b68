//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BoardState, CELL_COUNT, Cell, Player};
pub use game::{Game, Move, Outcome};
pub use lines::{LineAnalyzer, WINNING_LINES};

/// Verdict for a board; the call the UI layer makes after every move.
pub fn evaluate_outcome(board: &BoardState) -> Outcome {
    board.outcome()
}
