//! Move policy port

use crate::{Result, tictactoe::BoardState};

/// Something that picks a cell for the player to move.
///
/// Implemented by:
/// - the hybrid engine at a fixed strength
/// - the random baseline
/// - the exact minimax baseline
pub trait MovePolicy {
    /// Select a move for `state.to_move`.
    ///
    /// The returned position (0-8) must be empty on `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid moves are available (terminal state).
    fn select_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Name used in duel reports and logs.
    fn name(&self) -> &str;

    /// Seed the policy's random number generator, if it has one.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

impl<P: MovePolicy + ?Sized> MovePolicy for Box<P> {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        (**self).select_move(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        (**self).set_rng_seed(seed)
    }
}
