//! CLI infrastructure for the hybrid engine
//!
//! Thin wrappers around the library: ask the engine for a move, evaluate a
//! board, or pit the engine against a baseline opponent.

pub mod commands;
pub mod config;
pub mod output;
