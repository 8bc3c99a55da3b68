//! Subcommands of the `hybrid-ttt` binary

pub mod decide;
pub mod duel;
pub mod outcome;
