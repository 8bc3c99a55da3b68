//! Error types for the hybrid engine

use std::fmt;

use thiserror::Error;

/// Why a move was rejected by the board model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveKind {
    OutOfRange,
    Occupied,
}

impl fmt::Display for IllegalMoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveKind::OutOfRange => f.write_str("out of bounds (must be 0-8)"),
            IllegalMoveKind::Occupied => f.write_str("already occupied"),
        }
    }
}

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: position {position} is {kind}")]
    IllegalMove {
        position: usize,
        kind: IllegalMoveKind,
    },

    #[error("no legal moves to search from board '{board}'")]
    EmptyMoveSet { board: String },

    #[error("game already over")]
    GameOver,

    #[error("board string must hold {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must differ by at most 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid player '{player}' in '{context}' (expected 'X' or 'O')")]
    InvalidPlayerString { player: String, context: String },

    #[error("invalid difficulty '{input}'. Expected one of: {expected}")]
    ParseDifficulty { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
