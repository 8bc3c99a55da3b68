//! Ports (trait boundaries) between the engine and its callers.
//!
//! Anything that can pick a move for a board implements [`MovePolicy`], so
//! the engine and the baseline opponents are interchangeable in duels and
//! tests.

pub mod policy;

pub use policy::MovePolicy;
