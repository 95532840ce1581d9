//! Decide command - one move for one snapshot

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexflag_core::{Agent, AgentConfig, Snapshot, StrategyKind, TeamColor};

#[derive(Args)]
pub struct DecideArgs {
    /// Snapshot JSON file ({"map": .., "entities": [..], "score": {..}})
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Team to play (Red or Blue)
    #[arg(long)]
    pub team: TeamColor,

    /// Strategy name (see `hexflag strategies`)
    #[arg(long, conflicts_with = "config")]
    pub strategy: Option<StrategyKind>,

    /// Agent config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DecideArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", args.snapshot.display()))?;
    let config = load_config(&args)?;
    let strategy = config.strategy;

    let mut agent = Agent::new(args.team, config);
    let direction = agent.decide(&snapshot.map, &snapshot.entities, snapshot.score.as_ref());

    if args.json {
        let output = serde_json::json!({
            "team": args.team.to_string(),
            "strategy": strategy.name(),
            "direction": direction,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", direction.number());
    }
    Ok(())
}

fn load_config(args: &DecideArgs) -> Result<AgentConfig> {
    match (&args.config, args.strategy) {
        (Some(path), _) => AgentConfig::load(path)
            .with_context(|| format!("Failed to load agent config: {}", path.display())),
        (None, Some(strategy)) => Ok(AgentConfig::new(strategy)),
        (None, None) => Ok(AgentConfig::default()),
    }
}
