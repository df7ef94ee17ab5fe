//! questlearn CLI - Linear Q-learning agents for text-based games
//!
//! This CLI provides a unified interface for:
//! - Training agents on table-driven worlds over several independent runs
//! - Evaluating saved models

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "questlearn")]
#[command(version, about = "Linear Q-learning for text-based games", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent on a world
    Train(Box<questlearn::cli::commands::train::TrainArgs>),

    /// Evaluate a saved model on a world
    Evaluate(questlearn::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "questlearn=debug" } else { "questlearn=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Train(args) => questlearn::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => questlearn::cli::commands::evaluate::execute(args),
    }
}
