//! Configuration types for engine creation.

use std::{f64::consts::SQRT_2, fs, path::Path};

use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, SearchBudget, Strength};

/// Configuration for creating an [`Engine`](super::Engine).
///
/// # Examples
///
/// ```
/// use hybrid_ttt::engine::{Difficulty, EngineConfig};
///
/// let config = EngineConfig::new(Difficulty::Medium)
///     .with_seed(42)
///     .with_simulations(500);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Named preset the engine plays at
    pub difficulty: Difficulty,
    /// Requested MCTS iterations, capped by the preset
    pub simulations: Option<u32>,
    /// Requested minimax threshold, capped by the preset
    pub minimax_threshold: Option<usize>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// UCT exploration constant
    pub exploration: f64,
}

impl EngineConfig {
    /// Create a configuration for `difficulty` with no overrides.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            simulations: None,
            minimax_threshold: None,
            seed: None,
            exploration: SQRT_2,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = Some(simulations);
        self
    }

    pub fn with_minimax_threshold(mut self, threshold: usize) -> Self {
        self.minimax_threshold = Some(threshold);
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Strength described by this configuration.
    ///
    /// Without overrides this is the bare preset; with any override the
    /// missing half is filled from the preset and the whole is capped by it.
    pub fn strength(&self) -> Strength {
        if self.simulations.is_none() && self.minimax_threshold.is_none() {
            return Strength::Preset(self.difficulty);
        }
        let preset = self.difficulty.preset();
        Strength::Requested {
            difficulty: self.difficulty,
            budget: SearchBudget::new(
                self.simulations.unwrap_or(preset.simulations),
                self.minimax_threshold.unwrap_or(preset.minimax_threshold),
            ),
        }
    }

    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] for a non-positive or
    /// non-finite exploration constant or zero simulations.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.exploration.is_finite() || self.exploration <= 0.0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "exploration constant must be positive and finite, got {}",
                    self.exploration
                ),
            });
        }
        if self.simulations == Some(0) {
            return Err(crate::Error::InvalidConfiguration {
                message: "simulations must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load a JSON configuration file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> crate::Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read engine config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
