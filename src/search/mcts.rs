//! Monte Carlo Tree Search with UCT selection.
//!
//! The tree uses arena allocation: nodes live in a contiguous `Vec` and
//! refer to each other by [`NodeId`]. A tree is built per search call and
//! dropped when the move has been read from it.

use std::f64::consts::SQRT_2;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Result,
    tictactoe::{BoardState, Outcome, Player},
};

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Position at this node; `board.to_move` plays next
    pub board: BoardState,

    /// Move that led here from the parent (None for the root)
    pub mv: Option<usize>,

    /// Parent node index (None for the root)
    pub parent: Option<NodeId>,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    pub visits: u32,

    /// Sum of playout rewards from the engine player's perspective
    pub reward: f64,
}

impl SearchNode {
    fn new(board: BoardState, mv: Option<usize>, parent: Option<NodeId>) -> Self {
        Self {
            board,
            mv,
            parent,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
        }
    }

    /// Mean engine reward, 0.0 if never visited.
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / f64::from(self.visits)
        }
    }
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Select-expand-simulate-backpropagate rounds per search (at least 1)
    pub iterations: u32,

    /// UCT exploration constant
    pub exploration: f64,

    /// Score opponent choices by the opponent's own win rate. Off by
    /// default: every level uses the engine's win rate.
    #[serde(default)]
    pub model_opponent: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: SQRT_2,
            model_opponent: false,
        }
    }
}

impl MctsConfig {
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn with_opponent_model(mut self, model_opponent: bool) -> Self {
        self.model_opponent = model_opponent;
        self
    }
}

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    engine: Player,
    model_opponent: bool,
}

impl SearchTree {
    /// Create a tree whose root is `root`, searched for the player to move there.
    pub fn new(root: BoardState) -> Self {
        Self {
            nodes: vec![SearchNode::new(root, None, None)],
            engine: root.to_move,
            model_opponent: false,
        }
    }

    /// Let the opponent pick by its own win rate during selection.
    pub fn with_opponent_model(mut self, model_opponent: bool) -> Self {
        self.model_opponent = model_opponent;
        self
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Player whose rewards the tree accumulates.
    pub fn engine(&self) -> Player {
        self.engine
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id` in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> {
        self.get(id).children.iter().map(|&child| self.get(child))
    }

    /// Every legal move from this node already has a child.
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.children.len() == node.board.legal_moves().len()
    }

    fn untried_moves(&self, id: NodeId) -> Vec<usize> {
        let node = self.get(id);
        let tried: Vec<usize> = self.children(id).filter_map(|child| child.mv).collect();
        node.board
            .legal_moves()
            .into_iter()
            .filter(|mv| !tried.contains(mv))
            .collect()
    }

    /// UCT value of `child`: `winRate + C * sqrt(ln(parentVisits) / childVisits)`.
    ///
    /// `winRate` is the engine's mean reward at every level, or the
    /// opponent's (`1 - mean`) at opponent choices when the tree models the
    /// opponent. Unvisited children are +inf so they are always tried first.
    pub fn uct(&self, child: NodeId, exploration: f64) -> f64 {
        let node = self.get(child);
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let Some(parent) = node.parent.map(|p| self.get(p)) else {
            return node.mean_reward();
        };

        let engine_rate = node.mean_reward();
        let win_rate = if self.model_opponent && parent.board.to_move != self.engine {
            1.0 - engine_rate
        } else {
            engine_rate
        };
        let visits = f64::from(node.visits);
        win_rate + exploration * (f64::from(parent.visits).ln() / visits).sqrt()
    }

    /// Child with the highest UCT value; the first one wins ties.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for &child in &self.get(id).children {
            let value = self.uct(child, exploration);
            if best.is_none() || value > best_value {
                best = Some(child);
                best_value = value;
            }
        }
        best
    }

    /// Add a child for `mv` under `parent`.
    ///
    /// # Errors
    ///
    /// Returns an illegal move error if `mv` is not playable at the parent.
    pub fn add_child(&mut self, parent: NodeId, mv: usize) -> Result<NodeId> {
        let board = self.get(parent).board.make_move(mv)?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(board, Some(mv), Some(parent)));
        self.get_mut(parent).children.push(id);
        Ok(id)
    }

    /// Credit `outcome` to `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Outcome) {
        let reward = outcome.reward_for(self.engine);
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.reward += reward;
            current = node.parent;
        }
    }

    /// Root child with the most visits; the first one wins ties.
    pub fn most_visited_child(&self) -> Option<&SearchNode> {
        let mut best: Option<&SearchNode> = None;
        for child in self.children(self.root()) {
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best
    }
}

/// Play uniformly random moves until the game ends.
pub fn random_playout<R: Rng + ?Sized>(board: &BoardState, rng: &mut R) -> Outcome {
    let mut state = *board;
    loop {
        let outcome = state.outcome();
        if outcome.is_decided() {
            return outcome;
        }
        let moves = state.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            return outcome;
        };
        state.cells[mv] = state.to_move.to_cell();
        state.to_move = state.to_move.opponent();
    }
}

/// UCT searcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mcts {
    config: MctsConfig,
}

impl Mcts {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Grow a tree from `root` for the configured number of iterations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyMoveSet`] for a decided root and
    /// [`crate::Error::InvalidConfiguration`] for zero iterations.
    pub fn run<R: Rng + ?Sized>(&self, root: &BoardState, rng: &mut R) -> Result<SearchTree> {
        if root.is_terminal() {
            return Err(crate::Error::EmptyMoveSet {
                board: root.encode(),
            });
        }
        if self.config.iterations == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "MCTS needs at least one iteration".to_string(),
            });
        }

        let mut tree = SearchTree::new(*root).with_opponent_model(self.config.model_opponent);
        for iteration in 0..self.config.iterations {
            let mut node = tree.root();

            while tree.is_fully_expanded(node) {
                match tree.select_child(node, self.config.exploration) {
                    Some(child) => node = child,
                    None => break,
                }
            }

            if !tree.get(node).board.is_terminal()
                && let Some(&mv) = tree.untried_moves(node).choose(rng)
            {
                node = tree.add_child(node, mv)?;
            }

            let board = tree.get(node).board;
            let outcome = match board.outcome() {
                Outcome::InProgress => random_playout(&board, rng),
                decided => decided,
            };
            trace!(iteration, leaf = %board.encode(), %outcome, "playout finished");

            tree.backpropagate(node, outcome);
        }

        Ok(tree)
    }

    /// Most visited root move after a full search.
    pub fn search<R: Rng + ?Sized>(&self, root: &BoardState, rng: &mut R) -> Result<usize> {
        let tree = self.run(root, rng)?;
        let best = tree
            .most_visited_child()
            .and_then(|child| child.mv.map(|mv| (mv, child.visits)))
            .ok_or_else(|| crate::Error::EmptyMoveSet {
                board: root.encode(),
            })?;

        debug!(
            board = %root.encode(),
            best_move = best.0,
            visits = best.1,
            nodes = tree.len(),
            iterations = self.config.iterations,
            "mcts finished"
        );
        Ok(best.0)
    }
}

/// Search `root` for its player to move with the default exploration constant.
pub fn mcts<R: Rng + ?Sized>(root: &BoardState, iterations: u32, rng: &mut R) -> Result<usize> {
    Mcts::new(MctsConfig::with_iterations(iterations)).search(root, rng)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    #[test]
    fn test_terminal_root_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = mcts(&board("XXXOO...."), 10, &mut rng).unwrap_err();
        assert!(matches!(err, crate::Error::EmptyMoveSet { .. }));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = mcts(&BoardState::new(), 0, &mut rng).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_single_iteration_returns_legal_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let b = board("X...O....");
        let mv = mcts(&b, 1, &mut rng).unwrap();
        assert!(b.legal_moves().contains(&mv));
    }

    #[test]
    fn test_root_visits_match_iterations() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = Mcts::new(MctsConfig::with_iterations(300))
            .run(&BoardState::new(), &mut rng)
            .unwrap();

        let root = tree.get(tree.root());
        assert_eq!(root.visits, 300);
        assert_eq!(root.children.len(), 9);
        let child_visits: u32 = tree.children(tree.root()).map(|c| c.visits).sum();
        assert_eq!(child_visits, 300);
    }

    #[test]
    fn test_every_root_child_tried_before_revisiting() {
        let mut rng = StdRng::seed_from_u64(11);
        let b = board("X...O....");
        let tree = Mcts::new(MctsConfig::with_iterations(7))
            .run(&b, &mut rng)
            .unwrap();

        assert_eq!(tree.get(tree.root()).children.len(), 7);
        assert!(tree.children(tree.root()).all(|c| c.visits == 1));
    }

    #[test]
    fn test_same_seed_same_move() {
        let b = board("X...O....");
        let first = mcts(&b, 500, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = mcts(&b, 500, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_finds_the_only_saving_move() {
        // X to move, O threatens column 0
        // O X .
        // O . .
        // . . X
        let b = board("OX.O....X");
        let config = MctsConfig::with_iterations(3000).with_opponent_model(true);
        let mv = Mcts::new(config).search(&b, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(mv, 6);
    }

    #[test]
    fn test_backpropagate_rewards_engine_perspective() {
        let mut tree = SearchTree::new(BoardState::new());
        let child = tree.add_child(tree.root(), 4).unwrap();
        tree.backpropagate(child, Outcome::Win(Player::X));
        tree.backpropagate(child, Outcome::Draw);
        tree.backpropagate(child, Outcome::Win(Player::O));

        let node = tree.get(child);
        assert_eq!(node.visits, 3);
        assert!((node.reward - 1.5).abs() < 1e-12);
        assert_eq!(tree.get(tree.root()).visits, 3);
    }

    #[test]
    fn test_uct_uses_engine_win_rate_at_every_level() {
        let mut tree = SearchTree::new(BoardState::new());
        let x_move = tree.add_child(tree.root(), 0).unwrap();
        let o_move = tree.add_child(x_move, 4).unwrap();
        tree.backpropagate(o_move, Outcome::Win(Player::X));

        // parent visits 1 -> ln(1) = 0, only the win rate remains
        assert_eq!(tree.uct(x_move, SQRT_2), 1.0);
        assert_eq!(tree.uct(o_move, SQRT_2), 1.0);
    }

    #[test]
    fn test_uct_opponent_model_flips_opponent_choice() {
        let mut tree = SearchTree::new(BoardState::new()).with_opponent_model(true);
        let x_move = tree.add_child(tree.root(), 0).unwrap();
        let o_move = tree.add_child(x_move, 4).unwrap();
        tree.backpropagate(o_move, Outcome::Win(Player::X));

        assert_eq!(tree.uct(x_move, SQRT_2), 1.0);
        assert_eq!(tree.uct(o_move, SQRT_2), 0.0);
    }

    #[test]
    fn test_default_config_does_not_model_opponent() {
        assert!(!MctsConfig::default().model_opponent);
        assert!(MctsConfig::with_iterations(10).with_opponent_model(true).model_opponent);
    }

    #[test]
    fn test_random_playout_terminates() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            assert!(random_playout(&BoardState::new(), &mut rng).is_decided());
        }
    }
}
