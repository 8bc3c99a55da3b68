//! Hybrid tic-tac-toe decision engine
//!
//! This crate provides:
//! - Tic-Tac-Toe board model with outcome evaluation
//! - Exact alpha-beta minimax with an explicit memo cache
//! - Monte Carlo Tree Search with UCT selection over an arena tree
//! - A hybrid policy routing each position to the cheapest sound search
//! - Difficulty presets and a single engine entry point for UI layers

pub mod adapters;
pub mod cli;
pub mod duel;
pub mod engine;
pub mod error;
pub mod ports;
pub mod search;
pub mod tictactoe;

pub use engine::{Decision, Difficulty, Engine, EngineConfig, Route, SearchBudget, Strength};
pub use error::{Error, IllegalMoveKind, Result};
pub use tictactoe::{BoardState, Cell, Outcome, Player, evaluate_outcome};
