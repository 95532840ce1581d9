//! HEXFLAG CLI - offline harness for the move-decision engine
//!
//! Commands:
//! - decide: Pick one move for a snapshot file
//! - match: Play arena games between two strategies
//! - strategies: List the available strategies

mod decide_cmd;
mod match_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexflag_core::StrategyKind;

#[derive(Parser)]
#[command(name = "hexflag")]
#[command(about = "Hex-grid capture-the-flag agent harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide one move for a snapshot
    Decide(decide_cmd::DecideArgs),
    /// Play arena games between two strategies
    Match(match_cmd::MatchArgs),
    /// List available strategies
    Strategies,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decide(args) => decide_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args),
        Commands::Strategies => {
            for kind in StrategyKind::ALL {
                println!("{:<18} {}", kind.name(), kind.description());
            }
            Ok(())
        }
    }
}
