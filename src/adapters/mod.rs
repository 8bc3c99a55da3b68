//! Adapters implementing the [`MovePolicy`](crate::ports::MovePolicy) port.

pub mod baseline;
pub mod engine_policy;

pub use baseline::{OptimalPolicy, RandomPolicy};
pub use engine_policy::EnginePolicy;
