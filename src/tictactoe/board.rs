//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::Outcome, lines::LineAnalyzer};
use crate::error::IllegalMoveKind;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::X => "X",
            Player::O => "O",
        })
    }
}

/// Complete board state including cells and whose turn it is
///
/// This type is `Copy` (10 bytes), so searches always work on their own
/// copies and never touch the caller's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
    pub to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first.
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; CELL_COUNT],
            to_move: first_player,
        }
    }

    /// Same cells, different player to move.
    #[must_use]
    pub fn with_to_move(mut self, player: Player) -> Self {
        self.to_move = player;
        self
    }

    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELL_COUNT], crate::Error> {
        let Ok(chars) = <&[char; CELL_COUNT]>::try_from(chars) else {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: context.to_string(),
            });
        };

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (position, (&character, cell)) in chars.iter().zip(cells.iter_mut()).enumerate() {
            *cell = Cell::from_char(character).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character,
                position,
                context: context.to_string(),
            })?;
        }
        Ok(cells)
    }

    fn count_pieces(cells: &[Cell; CELL_COUNT]) -> PieceCount {
        cells.iter().fold(PieceCount { x: 0, o: 0 }, |count, cell| match cell {
            Cell::X => PieceCount { x: count.x + 1, ..count },
            Cell::O => PieceCount { o: count.o + 1, ..count },
            Cell::Empty => count,
        })
    }

    fn parse_player(token: &str, context: &str) -> Result<Player, crate::Error> {
        if token.eq_ignore_ascii_case("x") {
            Ok(Player::X)
        } else if token.eq_ignore_ascii_case("o") {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPlayerString {
                player: token.to_string(),
                context: context.to_string(),
            })
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string holds 9 cell characters (`X`, `O`, `.`; whitespace and `|`
    /// are ignored) and may end with `_X` or `_O` to set the player to move.
    /// Without the suffix the player is inferred from the piece counts, with
    /// X moving first, and the counts must differ by at most one. An explicit
    /// suffix accepts any arrangement of pieces.
    ///
    /// # Errors
    ///
    /// Returns error if the board part is not nine cells, contains an unknown
    /// character, the suffix is not a player, or, without a suffix, the piece
    /// counts differ by more than one.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        let (board_part, suffix) = match cleaned.rsplit_once('_') {
            Some((board, suffix)) if board.chars().count() == CELL_COUNT => (board, Some(suffix)),
            _ => (cleaned.as_str(), None),
        };
        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, s)?;
        if let Some(player) = suffix {
            let to_move = Self::parse_player(player, s)?;
            return Ok(BoardState { cells, to_move });
        }

        let count = Self::count_pieces(&cells);
        if count.x.abs_diff(count.o) > 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }
        let to_move = if count.x > count.o { Player::O } else { Player::X };
        Ok(BoardState { cells, to_move })
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Count the number of empty cells on the board.
    pub fn empty_count(&self) -> usize {
        CELL_COUNT - self.occupied_count()
    }

    /// Get cell at position (0-8)
    ///
    /// # Panics
    ///
    /// Panics if `pos >= 9`.
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    ///
    /// # Panics
    ///
    /// Panics if `pos >= 9`; [`BoardState::apply_move`] checks the range first.
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// All empty positions in ascending order.
    ///
    /// Search tie-breaking depends on this order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place `player`'s piece at `pos` and hand the turn to the other player.
    #[must_use = "apply_move returns a new board state; the original is unchanged"]
    pub fn apply_move(&self, pos: usize, player: Player) -> Result<BoardState, crate::Error> {
        if pos >= CELL_COUNT {
            return Err(crate::Error::IllegalMove {
                position: pos,
                kind: IllegalMoveKind::OutOfRange,
            });
        }

        if !self.is_empty(pos) {
            return Err(crate::Error::IllegalMove {
                position: pos,
                kind: IllegalMoveKind::Occupied,
            });
        }

        let mut new_state = *self;
        new_state.cells[pos] = player.to_cell();
        new_state.to_move = player.opponent();
        Ok(new_state)
    }

    /// Make a move for the player to move and return a new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        self.apply_move(pos, self.to_move)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Evaluate the position from the cells alone.
    pub fn outcome(&self) -> Outcome {
        if let Some(player) = self.winner() {
            Outcome::Win(player)
        } else if self.cells.contains(&Cell::Empty) {
            Outcome::InProgress
        } else {
            Outcome::Draw
        }
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_decided()
    }

    /// First move, in ascending order, that wins on the spot for `player`.
    ///
    /// Works regardless of whose turn it is, so it doubles as threat
    /// detection for the opponent.
    pub fn immediate_win(&self, player: Player) -> Option<usize> {
        LineAnalyzer::winning_moves(&self.cells, player)
            .first()
            .copied()
    }

    /// Get a string representation for use as a key
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
