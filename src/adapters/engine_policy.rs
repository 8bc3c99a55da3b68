//! The hybrid engine seen as a [`MovePolicy`].

use crate::{
    Result,
    engine::{Engine, EngineConfig, Strength},
    ports::MovePolicy,
    tictactoe::BoardState,
};

#[derive(Debug)]
pub struct EnginePolicy {
    name: String,
    engine: Engine,
    strength: Strength,
}

impl EnginePolicy {
    pub fn new(name: impl Into<String>, engine: Engine, strength: impl Into<Strength>) -> Self {
        Self {
            name: name.into(),
            engine,
            strength: strength.into(),
        }
    }

    /// Build the engine and its strength from one configuration.
    pub fn from_config(name: impl Into<String>, config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(name, Engine::new(config)?, config.strength()))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }
}

impl MovePolicy for EnginePolicy {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        self.engine.decide_move(state, self.strength)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.engine.reseed(seed);
        Ok(())
    }
}
