//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Owner of the first fully occupied line, scanning rows, columns, then diagonals
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let owner = cells[a].to_player()?;
            (cells[b] == cells[a] && cells[c] == cells[a]).then_some(owner)
        })
    }

    /// All positions that would immediately win for the player, ascending
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// The empty cell of a line holding two of `player`'s pieces
    fn winning_move_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mine = line.iter().filter(|&&idx| cells[idx] == target).count();
        let mut empty = line.iter().copied().filter(|&idx| cells[idx] == Cell::Empty);
        match (mine, empty.next(), empty.next()) {
            (2, Some(pos), None) => Some(pos),
            _ => None,
        }
    }
}
