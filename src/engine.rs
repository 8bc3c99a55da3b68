//! Decision engine: the entry point a UI layer calls after every human move.
//!
//! The engine owns the minimax memo cache and the random source. It always
//! plays for `board.to_move`; the caller applies the returned index to the
//! board it owns.

pub mod config;
pub mod difficulty;
pub mod hybrid;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::debug;

pub use config::EngineConfig;
pub use difficulty::{Difficulty, DifficultyPreset, SearchBudget, Strength};
pub use hybrid::{Decision, Route, choose_move};

use crate::{Result, search::MemoCache, tictactoe::BoardState};

pub struct Engine {
    memo: MemoCache,
    rng: StdRng,
    exploration: f64,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("memo_entries", &self.memo.len())
            .field("exploration", &self.exploration)
            .finish()
    }
}

impl Engine {
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            memo: MemoCache::new(),
            rng,
            exploration: config.exploration,
        })
    }

    /// Engine with default settings and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            memo: MemoCache::new(),
            rng: StdRng::seed_from_u64(seed),
            exploration: std::f64::consts::SQRT_2,
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn memo(&self) -> &MemoCache {
        &self.memo
    }

    /// Drop all cached minimax results. Never changes future decisions.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// Choose a move for `board.to_move` and report how it was chosen.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyMoveSet`] if the board is already decided.
    pub fn decide(&mut self, board: &BoardState, strength: impl Into<Strength>) -> Result<Decision> {
        if board.is_terminal() {
            return Err(crate::Error::EmptyMoveSet {
                board: board.encode(),
            });
        }

        let (budget, random_move_probability) = strength.into().resolve();
        if random_move_probability > 0.0 && self.rng.random::<f64>() < random_move_probability {
            let moves = board.legal_moves();
            let position = *moves
                .choose(&mut self.rng)
                .ok_or_else(|| crate::Error::EmptyMoveSet {
                    board: board.encode(),
                })?;
            debug!(board = %board.encode(), position, "difficulty picked a random move");
            return Ok(Decision {
                position,
                route: Route::Random,
            });
        }

        choose_move(
            board,
            budget,
            &mut self.memo,
            self.exploration,
            &mut self.rng,
        )
    }

    /// Choose a move for `board.to_move`.
    pub fn decide_move(&mut self, board: &BoardState, strength: impl Into<Strength>) -> Result<usize> {
        self.decide(board, strength).map(|decision| decision.position)
    }
}
