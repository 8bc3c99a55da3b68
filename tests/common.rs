//! Shared helpers for the integration tests.
//!
//! Provides exhaustive enumeration of reachable positions and an unpruned
//! negamax oracle to check the engine's searches against.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use hybrid_ttt::{BoardState, Outcome, Player};

/// Every position reachable by legal play from the empty board, with
/// either player opening. Decided positions are included.
pub fn reachable_positions() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![BoardState::new(), BoardState::new_with_player(Player::O)];

    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        order.push(board);
        if board.is_terminal() {
            continue;
        }
        for mv in board.legal_moves() {
            stack.push(board.make_move(mv).expect("legal move"));
        }
    }
    order
}

/// Reachable positions that are still in progress.
pub fn open_positions() -> Vec<BoardState> {
    reachable_positions()
        .into_iter()
        .filter(|board| !board.is_terminal())
        .collect()
}

/// Plain negamax without pruning: +1 if the side to move wins with best
/// play, 0 for a draw, -1 for a loss.
pub struct Oracle {
    values: HashMap<BoardState, i32>,
}

impl Oracle {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn value(&mut self, board: &BoardState) -> i32 {
        if let Some(&value) = self.values.get(board) {
            return value;
        }
        let value = match board.outcome() {
            Outcome::Win(winner) if winner == board.to_move => 1,
            Outcome::Win(_) => -1,
            Outcome::Draw => 0,
            Outcome::InProgress => board
                .legal_moves()
                .into_iter()
                .map(|mv| -self.value(&board.make_move(mv).expect("legal move")))
                .max()
                .expect("open board has moves"),
        };
        self.values.insert(*board, value);
        value
    }

    /// Value for the side to move after it plays `mv`.
    pub fn move_value(&mut self, board: &BoardState, mv: usize) -> i32 {
        -self.value(&board.make_move(mv).expect("legal move"))
    }

    /// Moves reaching the best achievable value, ascending.
    pub fn optimal_moves(&mut self, board: &BoardState) -> Vec<usize> {
        let best = self.value(board);
        board
            .legal_moves()
            .into_iter()
            .filter(|&mv| self.move_value(board, mv) == best)
            .collect()
    }
}

/// Cells completing a line for `player` on this board.
pub fn winning_cells(board: &BoardState, player: Player) -> Vec<usize> {
    board
        .legal_moves()
        .into_iter()
        .filter(|&mv| {
            board
                .apply_move(mv, player)
                .is_ok_and(|next| next.has_won(player))
        })
        .collect()
}
