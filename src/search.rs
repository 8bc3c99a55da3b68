//! Game-tree search: exact minimax for shallow positions, MCTS for the rest

pub mod mcts;
pub mod memo;
pub mod minimax;

pub use mcts::{Mcts, MctsConfig, NodeId, SearchNode, SearchTree, mcts, random_playout};
pub use memo::{Bound, MemoCache, MemoEntry, MemoKey, MemoStats};
pub use minimax::{FULL_WINDOW, Minimax, MinimaxResult, minimax};
