//! Outcome command - Report who has won a position

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::PositionArgs,
        output::{print_board, print_json, print_kv, print_section},
    },
    tictactoe::{Outcome, evaluate_outcome},
};

#[derive(Parser, Debug)]
#[command(about = "Print the outcome of a position")]
pub struct OutcomeArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct OutcomeReport {
    board: String,
    outcome: Outcome,
    legal_moves: Vec<usize>,
}

pub fn execute(args: OutcomeArgs) -> Result<()> {
    let board = args.position.resolve().context("invalid position")?;
    let outcome = evaluate_outcome(&board);
    let report = OutcomeReport {
        board: board.encode(),
        outcome,
        legal_moves: if outcome.is_decided() {
            Vec::new()
        } else {
            board.legal_moves()
        },
    };

    if args.json {
        return print_json(&report);
    }

    print_section("Outcome");
    print_board(&board);
    print_kv("Outcome", &report.outcome.to_string());
    if !report.legal_moves.is_empty() {
        let moves: Vec<String> = report.legal_moves.iter().map(usize::to_string).collect();
        print_kv("Legal moves", &moves.join(", "));
    }
    Ok(())
}
