//! Game outcomes and move history

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Verdict for a board, derived from its cells only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    InProgress,
}

impl Outcome {
    /// True once the game is won or drawn
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Playout reward for `player`: 1 for a win, 0.5 for a draw, 0 otherwise.
    pub fn reward_for(self, player: Player) -> f64 {
        match self {
            Outcome::Win(winner) if winner == player => 1.0,
            Outcome::Draw => 0.5,
            _ => 0.0,
        }
    }

    /// Minimax score for `player`: +1 win, -1 loss, 0 otherwise.
    pub fn score_for(self, player: Player) -> i32 {
        match self {
            Outcome::Win(winner) if winner == player => 1,
            Outcome::Win(_) => -1,
            Outcome::Draw | Outcome::InProgress => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => f.write_str("draw"),
            Outcome::InProgress => f.write_str("in progress"),
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Outcome,
}

impl Game {
    /// Create a new game with X to move
    pub fn new() -> Self {
        Self::from_position(BoardState::new())
    }

    /// Start recording from an arbitrary position
    pub fn from_position(initial: BoardState) -> Self {
        Game {
            initial,
            moves: Vec::new(),
            outcome: initial.outcome(),
        }
    }

    /// Replay a list of positions from the empty board, X first
    ///
    /// # Errors
    ///
    /// Returns error on an illegal move or a move after the game ended.
    pub fn from_moves(positions: &[usize]) -> Result<Self, crate::Error> {
        let mut game = Self::new();
        for &position in positions {
            game.play(position)?;
        }
        Ok(game)
    }

    /// Play a move for the side to move
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_decided() {
            return Err(crate::Error::GameOver);
        }

        let current = self.current_state()?;
        let new_state = current.make_move(position)?;

        self.moves.push(Move {
            position,
            player: current.to_move,
        });
        self.outcome = new_state.outcome();

        Ok(())
    }

    /// Get current board state
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid, which indicates
    /// corrupted game data.
    pub fn current_state(&self) -> Result<BoardState, crate::Error> {
        self.moves
            .iter()
            .try_fold(self.initial, |state, m| state.apply_move(m.position, m.player))
    }

    /// Get the sequence of board states, starting with the initial one
    pub fn state_sequence(&self) -> Result<Vec<BoardState>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = self.initial;
        states.push(state);

        for m in &self.moves {
            state = state.apply_move(m.position, m.player)?;
            states.push(state);
        }

        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
