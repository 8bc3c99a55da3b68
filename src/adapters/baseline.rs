//! Baseline opponents: uniform random play and exact minimax play.

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    ports::MovePolicy,
    search::{MemoCache, minimax},
    tictactoe::BoardState,
};

/// Random policy (baseline)
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a random policy with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MovePolicy for RandomPolicy {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        if state.is_terminal() {
            return Err(crate::Error::EmptyMoveSet {
                board: state.encode(),
            });
        }
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| crate::Error::EmptyMoveSet {
                board: state.encode(),
            })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Perfect play by full-window minimax, deterministic.
///
/// Keeps its own memo cache so it never shares entries with the engine it
/// is tested against.
#[derive(Debug, Default)]
pub struct OptimalPolicy {
    memo: MemoCache,
}

impl OptimalPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovePolicy for OptimalPolicy {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let result = minimax(state, &mut self.memo)?;
        result.best_move.ok_or_else(|| crate::Error::EmptyMoveSet {
            board: state.encode(),
        })
    }

    fn name(&self) -> &str {
        "optimal"
    }
}
