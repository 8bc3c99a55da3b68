//! Exact alpha-beta minimax with memoization.
//!
//! Scores are always from the perspective of the engine player: +1 win,
//! 0 draw, -1 loss. The engine player maximises, its opponent minimises.
//! Moves are tried in ascending index order and the first move reaching the
//! best score is kept, so play is reproducible.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::memo::{Bound, MemoCache, MemoEntry, MemoKey};
use crate::{
    Result,
    tictactoe::{BoardState, Player},
};

/// Window that never prunes at the root.
pub const FULL_WINDOW: (i32, i32) = (i32::MIN, i32::MAX);

/// Score and best move of a searched position.
///
/// Terminal positions carry no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimaxResult {
    pub score: i32,
    pub best_move: Option<usize>,
}

impl From<MemoEntry> for MinimaxResult {
    fn from(entry: MemoEntry) -> Self {
        MinimaxResult {
            score: entry.score,
            best_move: entry.best_move,
        }
    }
}

/// Alpha-beta searcher bound to one engine player and a borrowed cache.
pub struct Minimax<'a> {
    memo: &'a mut MemoCache,
    engine: Player,
    nodes: u64,
}

impl<'a> Minimax<'a> {
    pub fn new(memo: &'a mut MemoCache, engine: Player) -> Self {
        Self {
            memo,
            engine,
            nodes: 0,
        }
    }

    /// Positions visited since construction (cache hits included).
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Solve `board` for the player to move with a full window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyMoveSet`] if the board is already decided.
    pub fn solve(&mut self, board: &BoardState) -> Result<MinimaxResult> {
        if board.is_terminal() {
            return Err(crate::Error::EmptyMoveSet {
                board: board.encode(),
            });
        }

        let (alpha, beta) = FULL_WINDOW;
        let result = self.search(board, board.to_move, alpha, beta);
        debug!(
            board = %board.encode(),
            score = result.score,
            best_move = ?result.best_move,
            nodes = self.nodes,
            memo_entries = self.memo.len(),
            "minimax solved position"
        );
        Ok(result)
    }

    /// Alpha-beta search of `board` with `player_to_move` on turn.
    ///
    /// Results are exact whenever the true score lies strictly inside
    /// `(alpha, beta)`; outside the window they are bounds.
    pub fn search(
        &mut self,
        board: &BoardState,
        player_to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> MinimaxResult {
        self.nodes += 1;
        let board = board.with_to_move(player_to_move);

        let outcome = board.outcome();
        if outcome.is_decided() {
            return MinimaxResult {
                score: outcome.score_for(self.engine),
                best_move: None,
            };
        }

        let key = MemoKey {
            board,
            perspective: self.engine,
        };
        if let Some(entry) = self.memo.get(&key)
            && entry.usable(alpha, beta)
        {
            return entry.into();
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let maximizing = player_to_move == self.engine;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for mv in board.legal_moves() {
            let mut child = board;
            child.cells[mv] = player_to_move.to_cell();
            let reply = self.search(&child, player_to_move.opponent(), alpha, beta);

            if maximizing {
                if reply.score > best_score {
                    best_score = reply.score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if reply.score < best_score {
                    best_score = reply.score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                trace!(board = %board.encode(), cut_at = mv, "alpha-beta cut-off");
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.memo.put(
            key,
            MemoEntry {
                score: best_score,
                best_move,
                bound,
            },
        );

        MinimaxResult {
            score: best_score,
            best_move,
        }
    }
}

/// Full-window minimax for the player to move.
pub fn minimax(board: &BoardState, memo: &mut MemoCache) -> Result<MinimaxResult> {
    Minimax::new(memo, board.to_move).solve(board)
}
