//! Duel command - Play the engine against a baseline opponent

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    adapters::{EnginePolicy, OptimalPolicy, RandomPolicy},
    cli::{
        config::EngineArgs,
        output::{print_json, print_kv, print_section},
    },
    duel::{DuelSummary, run_duel},
    engine::Difficulty,
    ports::MovePolicy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Uniformly random legal moves
    Random,
    /// Perfect play via full minimax
    Optimal,
}

#[derive(Parser, Debug)]
#[command(about = "Play full games against a baseline opponent")]
pub struct DuelArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Opponent to play against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Optimal)]
    pub opponent: OpponentKind,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Let the opponent play X and open every game
    #[arg(long)]
    pub engine_second: bool,

    /// Seed for the random opponent
    #[arg(long)]
    pub opponent_seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DuelReport {
    difficulty: Difficulty,
    opponent: OpponentKind,
    engine_first: bool,
    #[serde(flatten)]
    summary: DuelSummary,
}

pub fn execute(args: DuelArgs) -> Result<()> {
    if args.games == 0 {
        anyhow::bail!("--games must be at least 1");
    }

    let config = args.engine.resolve().context("invalid engine settings")?;
    let mut engine = EnginePolicy::from_config("engine", &config)?;
    let mut opponent: Box<dyn MovePolicy> = match args.opponent {
        OpponentKind::Random => Box::new(match args.opponent_seed {
            Some(seed) => RandomPolicy::with_seed("random", seed),
            None => RandomPolicy::new("random"),
        }),
        OpponentKind::Optimal => Box::new(OptimalPolicy::new()),
    };

    let engine_first = !args.engine_second;
    let summary = run_duel(&mut engine, &mut opponent, args.games, engine_first)?;
    let report = DuelReport {
        difficulty: config.difficulty,
        opponent: args.opponent,
        engine_first,
        summary,
    };

    if args.json {
        return print_json(&report);
    }

    print_section("Duel Results");
    print_kv("Difficulty", &config.difficulty.to_string());
    print_kv("Opponent", opponent.name());
    print_kv("Engine plays", if engine_first { "X" } else { "O" });
    print_kv("Games", &summary.games.to_string());
    print_kv("Wins", &summary.wins.to_string());
    print_kv("Draws", &summary.draws.to_string());
    print_kv("Losses", &summary.losses.to_string());
    let games = summary.games as f64;
    print_kv(
        "Non-loss rate",
        &format!("{:.1}%", 100.0 * (summary.wins + summary.draws) as f64 / games),
    );
    Ok(())
}
