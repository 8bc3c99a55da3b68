//! Output formatting for CLI

use anyhow::Result;
use serde::Serialize;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:16} {}", format!("{}:", key), value);
}

/// Print a board as an indented 3x3 grid
pub fn print_board(board: &crate::tictactoe::BoardState) {
    for row in board.to_string().lines() {
        println!("    {row}");
    }
}

/// Print any report as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
