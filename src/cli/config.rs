//! Shared argument groups for CLI commands

use std::path::PathBuf;

use clap::Args;

use crate::{
    engine::{Difficulty, EngineConfig},
    tictactoe::{BoardState, Game},
};

/// Engine settings: an optional JSON file, then flag overrides
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// JSON file with engine settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Difficulty preset (easy, medium, hard)
    #[arg(long, short = 'd')]
    pub difficulty: Option<Difficulty>,

    /// MCTS iterations (capped by the preset)
    #[arg(long, short = 's')]
    pub simulations: Option<u32>,

    /// Solve exactly when at most this many cells are empty (capped by the preset)
    #[arg(long, short = 't')]
    pub threshold: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// UCT exploration constant
    #[arg(long)]
    pub exploration: Option<f64>,
}

impl EngineArgs {
    /// Merge the config file (if any) with the flags; flags win.
    pub fn resolve(&self) -> crate::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(simulations) = self.simulations {
            config.simulations = Some(simulations);
        }
        if let Some(threshold) = self.threshold {
            config.minimax_threshold = Some(threshold);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(exploration) = self.exploration {
            config.exploration = exploration;
        }

        config.validate()?;
        Ok(config)
    }
}

/// A position given either as cells or as a move list from the empty board
#[derive(Args, Debug, Clone, Default)]
pub struct PositionArgs {
    /// Board cells, e.g. "XX.O.O..." or "XX.O.O..._X"
    #[arg(long, short = 'b', conflicts_with = "moves")]
    pub board: Option<String>,

    /// Comma-separated moves from the empty board, X first, e.g. "4,0,8"
    #[arg(long, short = 'm')]
    pub moves: Option<String>,
}

impl PositionArgs {
    /// The requested position; the empty board when nothing is given.
    pub fn resolve(&self) -> crate::Result<BoardState> {
        if let Some(board) = &self.board {
            return BoardState::from_string(board);
        }
        let Some(moves) = &self.moves else {
            return Ok(BoardState::new());
        };

        let positions = moves
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| crate::Error::InvalidConfiguration {
                        message: format!("move '{token}' is not a cell index"),
                    })
            })
            .collect::<crate::Result<Vec<_>>>()?;
        Game::from_moves(&positions)?.current_state()
    }
}
