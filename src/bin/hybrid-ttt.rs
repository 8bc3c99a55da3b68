//! hybrid-ttt CLI - Tic-tac-toe decision engine
//!
//! This CLI provides:
//! - Move decisions for a given position and difficulty
//! - Outcome verdicts for arbitrary boards
//! - Duels against random and perfect baseline opponents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hybrid-ttt")]
#[command(version, about = "Hybrid minimax / MCTS tic-tac-toe engine", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a move for the side to move
    Decide(hybrid_ttt::cli::commands::decide::DecideArgs),

    /// Print the outcome of a position
    Outcome(hybrid_ttt::cli::commands::outcome::OutcomeArgs),

    /// Play full games against a baseline opponent
    Duel(hybrid_ttt::cli::commands::duel::DuelArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decide(args) => hybrid_ttt::cli::commands::decide::execute(args),
        Commands::Outcome(args) => hybrid_ttt::cli::commands::outcome::execute(args),
        Commands::Duel(args) => hybrid_ttt::cli::commands::duel::execute(args),
    }
}
