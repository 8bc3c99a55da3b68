//! Difficulty presets and search budgets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How much work the hybrid policy may spend on one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchBudget {
    /// MCTS iterations for midgame positions
    pub simulations: u32,
    /// Positions with at most this many empty cells are solved exactly
    pub minimax_threshold: usize,
}

impl SearchBudget {
    pub fn new(simulations: u32, minimax_threshold: usize) -> Self {
        Self {
            simulations,
            minimax_threshold,
        }
    }
}

/// Parameters bound to a named difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub simulations: u32,
    pub minimax_threshold: usize,
    /// Chance of skipping search and playing a uniformly random move
    pub random_move_probability: f64,
}

impl DifficultyPreset {
    pub fn budget(&self) -> SearchBudget {
        SearchBudget::new(self.simulations, self.minimax_threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Mostly random moves, shallow search otherwise.
    Easy,
    #[default]
    Medium,
    /// Whole game solved by minimax.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn preset(self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                simulations: 200,
                minimax_threshold: 2,
                random_move_probability: 0.8,
            },
            Difficulty::Medium => DifficultyPreset {
                simulations: 1000,
                minimax_threshold: 5,
                random_move_probability: 0.0,
            },
            Difficulty::Hard => DifficultyPreset {
                simulations: 4000,
                minimax_threshold: 9,
                random_move_probability: 0.0,
            },
        }
    }

    /// Budget actually used when the caller asks for `requested`.
    ///
    /// The preset is the ceiling: Easy always plays its own preset, Medium
    /// and Hard take the smaller of the requested and preset values. The
    /// threshold never drops below 1 and simulations never below 1.
    pub fn resolve(self, requested: Option<SearchBudget>) -> SearchBudget {
        let ceiling = self.preset().budget();
        let budget = match (self, requested) {
            (Difficulty::Easy, _) | (_, None) => ceiling,
            (_, Some(requested)) => SearchBudget::new(
                requested.simulations.min(ceiling.simulations),
                requested.minimax_threshold.min(ceiling.minimax_threshold),
            ),
        };
        SearchBudget::new(budget.simulations.max(1), budget.minimax_threshold.max(1))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" | "unbeatable" => Ok(Difficulty::Hard),
            _ => Err(crate::Error::ParseDifficulty {
                input: s.to_string(),
                expected: "easy, medium, hard".to_string(),
            }),
        }
    }
}

/// What the caller asks the engine to play with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Strength {
    /// Named preset, including its random-move behaviour.
    Preset(Difficulty),
    /// Explicit budget, never plays random moves.
    Custom(SearchBudget),
    /// Caller budget capped by the preset of `difficulty`.
    Requested {
        difficulty: Difficulty,
        budget: SearchBudget,
    },
}

impl Strength {
    /// Budget and random-move probability for this strength.
    pub fn resolve(self) -> (SearchBudget, f64) {
        match self {
            Strength::Preset(difficulty) => {
                let preset = difficulty.preset();
                (difficulty.resolve(None), preset.random_move_probability)
            }
            Strength::Custom(budget) => (
                SearchBudget::new(budget.simulations.max(1), budget.minimax_threshold),
                0.0,
            ),
            Strength::Requested { difficulty, budget } => (
                difficulty.resolve(Some(budget)),
                difficulty.preset().random_move_probability,
            ),
        }
    }
}

impl From<Difficulty> for Strength {
    fn from(difficulty: Difficulty) -> Self {
        Strength::Preset(difficulty)
    }
}

impl From<SearchBudget> for Strength {
    fn from(budget: SearchBudget) -> Self {
        Strength::Custom(budget)
    }
}
