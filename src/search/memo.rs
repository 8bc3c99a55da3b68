//! Memo cache for minimax results.
//!
//! Entries are keyed by cells, player to move and the player the scores are
//! relative to. Each entry remembers whether its score is exact or only a
//! bound left behind by an alpha-beta cut-off, so a lookup only short-cuts
//! the search when the stored value is valid for the caller's window.

use std::collections::HashMap;

use crate::tictactoe::{BoardState, Player};

/// Bound type of a stored score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower, // true score >= stored score (fail-high)
    Upper, // true score <= stored score (fail-low)
}

/// Cached minimax result for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoEntry {
    pub score: i32,
    pub best_move: Option<usize>,
    pub bound: Bound,
}

impl MemoEntry {
    /// Whether this entry answers a search with window `(alpha, beta)`.
    pub fn usable(&self, alpha: i32, beta: i32) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub board: BoardState,
    pub perspective: Player,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub gets: u64,
    pub hits: u64,
    pub puts: u64,
}

/// Process-wide minimax cache.
///
/// Purely an optimisation: clearing it at any point never changes the
/// result of a full-window search.
#[derive(Debug, Default)]
pub struct MemoCache {
    map: HashMap<MemoKey, MemoEntry>,
    stats: MemoStats,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HashMap::with_capacity(cap),
            stats: MemoStats::default(),
        }
    }

    pub fn get(&mut self, key: &MemoKey) -> Option<MemoEntry> {
        self.stats.gets += 1;
        let entry = self.map.get(key).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    /// Exact entries are never replaced by bounds.
    pub fn put(&mut self, key: MemoKey, entry: MemoEntry) {
        self.stats.puts += 1;
        let replace = match self.map.get(&key) {
            Some(old) => old.bound != Bound::Exact || entry.bound == Bound::Exact,
            None => true,
        };
        if replace {
            self.map.insert(key, entry);
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.stats = MemoStats::default();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> MemoKey {
        MemoKey {
            board: BoardState::new(),
            perspective: Player::O,
        }
    }

    #[test]
    fn test_usable_windows() {
        let exact = MemoEntry {
            score: 0,
            best_move: Some(4),
            bound: Bound::Exact,
        };
        assert!(exact.usable(-1, 1));

        let lower = MemoEntry {
            bound: Bound::Lower,
            score: 1,
            best_move: Some(0),
        };
        assert!(lower.usable(-1, 1));
        assert!(!lower.usable(-1, 2));

        let upper = MemoEntry {
            bound: Bound::Upper,
            score: -1,
            best_move: None,
        };
        assert!(upper.usable(-1, 1));
        assert!(!upper.usable(-2, 1));
    }

    #[test]
    fn test_exact_entry_survives_bound() {
        let mut cache = MemoCache::new();
        let exact = MemoEntry {
            score: 0,
            best_move: Some(4),
            bound: Bound::Exact,
        };
        cache.put(key(), exact);
        cache.put(
            key(),
            MemoEntry {
                score: 1,
                best_move: Some(0),
                bound: Bound::Lower,
            },
        );

        assert_eq!(cache.get(&key()), Some(exact));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_resets_entries_and_stats() {
        let mut cache = MemoCache::with_capacity(16);
        assert!(cache.get(&key()).is_none());
        cache.put(
            key(),
            MemoEntry {
                score: 0,
                best_move: Some(4),
                bound: Bound::Exact,
            },
        );
        assert!(cache.get(&key()).is_some());
        assert_eq!(cache.stats().hits, 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), MemoStats::default());
    }
}
