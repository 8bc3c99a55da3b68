//! Hybrid move selection.
//!
//! Cheap tactics first, exact search when the position is shallow, MCTS for
//! the midgame:
//! 1. win on the spot if possible
//! 2. otherwise block the opponent's immediate win
//! 3. otherwise solve with minimax when `empty cells <= minimax_threshold`
//! 4. otherwise run MCTS with `simulations` iterations

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::difficulty::SearchBudget;
use crate::{
    Result,
    search::{MemoCache, Mcts, MctsConfig, Minimax},
    tictactoe::BoardState,
};

/// Which step of the policy produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Win,
    Block,
    Minimax,
    Mcts,
    /// Difficulty-driven random move, the policy was skipped.
    Random,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Route::Win => "win",
            Route::Block => "block",
            Route::Minimax => "minimax",
            Route::Mcts => "mcts",
            Route::Random => "random",
        })
    }
}

/// A chosen cell and the route that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub position: usize,
    pub route: Route,
}

/// Pick a move for `board.to_move`.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyMoveSet`] if the board is already decided.
pub fn choose_move<R: Rng + ?Sized>(
    board: &BoardState,
    budget: SearchBudget,
    memo: &mut MemoCache,
    exploration: f64,
    rng: &mut R,
) -> Result<Decision> {
    if board.is_terminal() {
        return Err(crate::Error::EmptyMoveSet {
            board: board.encode(),
        });
    }

    let engine = board.to_move;
    let decision = if let Some(position) = board.immediate_win(engine) {
        Decision {
            position,
            route: Route::Win,
        }
    } else if let Some(position) = board.immediate_win(engine.opponent()) {
        Decision {
            position,
            route: Route::Block,
        }
    } else if board.empty_count() <= budget.minimax_threshold {
        let result = Minimax::new(memo, engine).solve(board)?;
        let position = result.best_move.ok_or_else(|| crate::Error::EmptyMoveSet {
            board: board.encode(),
        })?;
        Decision {
            position,
            route: Route::Minimax,
        }
    } else {
        let config = MctsConfig {
            iterations: budget.simulations,
            exploration,
            ..MctsConfig::default()
        };
        Decision {
            position: Mcts::new(config).search(board, rng)?,
            route: Route::Mcts,
        }
    };

    debug!(
        board = %board.encode(),
        empty = board.empty_count(),
        position = decision.position,
        route = %decision.route,
        "hybrid policy decided"
    );
    Ok(decision)
}
