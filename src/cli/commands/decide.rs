//! Decide command - Ask the engine for its next move

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::{EngineArgs, PositionArgs},
        output::{print_board, print_json, print_kv, print_section},
    },
    engine::{Engine, Route},
    tictactoe::{Outcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Choose a move for the side to move")]
pub struct DecideArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DecideReport {
    board: String,
    to_move: Player,
    position: usize,
    route: Route,
    outcome_after: Outcome,
}

pub fn execute(args: DecideArgs) -> Result<()> {
    let board = args.position.resolve().context("invalid position")?;
    let config = args.engine.resolve().context("invalid engine settings")?;
    let mut engine = Engine::new(&config)?;

    let decision = engine
        .decide(&board, config.strength())
        .with_context(|| format!("no move available on {}", board.encode()))?;
    let after = board.make_move(decision.position)?;

    let report = DecideReport {
        board: board.encode(),
        to_move: board.to_move,
        position: decision.position,
        route: decision.route,
        outcome_after: after.outcome(),
    };

    if args.json {
        return print_json(&report);
    }

    print_section("Decision");
    print_board(&board);
    print_kv("Difficulty", &config.difficulty.to_string());
    print_kv("To move", &report.to_move.to_string());
    print_kv("Move", &report.position.to_string());
    print_kv("Route", &report.route.to_string());
    println!();
    print_board(&after);
    print_kv("Outcome", &report.outcome_after.to_string());
    Ok(())
}
