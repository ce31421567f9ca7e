//! Command-line interface for quadratum.

use clap::{Args, Parser, Subcommand};
use quadratum_rules::{ScoringMode, Seat};
use std::path::PathBuf;

/// Quadratum - tilted-square board game
#[derive(Parser, Debug)]
#[command(name = "quadratum")]
#[command(about = "Plays Quadratum matches between heat-map bots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one or more bot-vs-bot games
    Play(PlayArgs),
}

/// Options for `quadratum play`.
///
/// Flags left unset fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(short, long, default_value = "1")]
    pub games: u32,

    /// Scoring mode of the first bot (cumulative, best-only)
    #[arg(long)]
    pub first_mode: Option<ScoringMode>,

    /// Scoring mode of the second bot (cumulative, best-only)
    #[arg(long)]
    pub second_mode: Option<ScoringMode>,

    /// Break ties between equally good cells randomly
    #[arg(long)]
    pub randomize: Option<bool>,

    /// Seed for tie-breaking; the second bot uses seed + 1
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seat that moves first (first, second)
    #[arg(long, default_value = "first")]
    pub starter: Seat,

    /// Score at which a sufficient lead wins
    #[arg(long)]
    pub min_score: Option<u32>,

    /// Lead required once the score threshold is reached
    #[arg(long)]
    pub min_difference: Option<u32>,

    /// Path to a TOML match configuration
    #[arg(short, long, env = "QUADRATUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}
