//! Match command - play arena games between two strategies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use hexflag_core::{play_match, Agent, AgentConfig, MatchOutcome, Snapshot, StrategyKind, TeamColor};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Starting snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Strategy playing Red
    #[arg(long)]
    pub red: StrategyKind,

    /// Strategy playing Blue
    #[arg(long)]
    pub blue: StrategyKind,

    /// Turns per game
    #[arg(long, default_value = "200")]
    pub turns: u32,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Seed for the per-game agent seeds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    outcome: MatchOutcome,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    red: StrategyKind,
    blue: StrategyKind,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    red_captures: u32,
    blue_captures: u32,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", args.snapshot.display()))?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, {} turns)",
        args.red,
        args.blue,
        args.games,
        args.turns
    );

    let results = play_games(&snapshot, &args)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games, optionally in parallel
fn play_games(snapshot: &Snapshot, args: &MatchArgs) -> Result<MatchResults> {
    let mut rng = create_rng(args.seed);
    let seeds: Vec<u64> = (0..args.games).map(|_| rng.gen()).collect();

    let play = |(i, &seed): (usize, &u64)| play_single_game(snapshot, args, i + 1, seed);
    let games = if args.parallel {
        seeds.par_iter().enumerate().map(play).collect::<Result<Vec<_>>>()?
    } else {
        seeds.iter().enumerate().map(play).collect::<Result<Vec<_>>>()?
    };

    Ok(compute_match_statistics(args.red, args.blue, games))
}

fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(snapshot: &Snapshot, args: &MatchArgs, game_number: usize, seed: u64) -> Result<GameRecord> {
    let mut red = Agent::new(TeamColor::Red, AgentConfig::new(args.red).with_seed(seed));
    let mut blue = Agent::new(TeamColor::Blue, AgentConfig::new(args.blue).with_seed(seed.wrapping_add(1)));

    let outcome = play_match(snapshot, &mut red, &mut blue, args.turns)
        .with_context(|| format!("Game {game_number} could not start"))?;

    tracing::info!(
        "Game {}: Red {} - Blue {} ({} turns)",
        game_number,
        outcome.score.red,
        outcome.score.blue,
        outcome.turns
    );

    Ok(GameRecord {
        game_number,
        seed,
        outcome,
    })
}

fn compute_match_statistics(red: StrategyKind, blue: StrategyKind, games: Vec<GameRecord>) -> MatchResults {
    let count = |team: Option<TeamColor>| games.iter().filter(|g| g.outcome.winner() == team).count();

    MatchResults {
        red,
        blue,
        red_wins: count(Some(TeamColor::Red)),
        blue_wins: count(Some(TeamColor::Blue)),
        draws: count(None),
        red_captures: games.iter().map(|g| g.outcome.red_captures).sum(),
        blue_captures: games.iter().map(|g| g.outcome.blue_captures).sum(),
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results: {} (Red) vs {} (Blue) ===", results.red, results.blue);
    println!("Total games:   {}", total);
    println!("Red wins:      {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("Blue wins:     {} ({:.1}%)", results.blue_wins, percent(results.blue_wins, total));
    println!("Draws:         {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Captures:      Red {} / Blue {}", results.red_captures, results.blue_captures);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} (seed {}): Red {} - Blue {} in {} turns",
            game.game_number, game.seed, game.outcome.score.red, game.outcome.score.blue, game.outcome.turns
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hexflag_core::Score;

    fn record(game_number: usize, red: u32, blue: u32) -> GameRecord {
        GameRecord {
            game_number,
            seed: game_number as u64,
            outcome: MatchOutcome {
                score: Score::new(red as i64, blue as i64),
                turns: 100,
                red_captures: red,
                blue_captures: blue,
            },
        }
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(StrategyKind::Direct, StrategyKind::Random, vec![]);
        assert_eq!(results.red_wins, 0);
        assert_eq!(results.blue_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.red_captures, 0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![record(1, 3, 1), record(2, 0, 2), record(3, 2, 2), record(4, 4, 0)];
        let results = compute_match_statistics(StrategyKind::Direct, StrategyKind::Greedy, games);
        assert_eq!(results.red_wins, 2);
        assert_eq!(results.blue_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.red_captures, 9);
        assert_eq!(results.blue_captures, 5);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}
