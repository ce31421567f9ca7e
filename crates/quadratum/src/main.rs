//! Quadratum - command line runner.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use quadratum::{Cli, Command, MatchConfig, PlayArgs, play_match, render_text};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args),
    }
}

/// Play bot-vs-bot games and print the summary
#[instrument(skip(args), fields(games = args.games, starter = %args.starter))]
fn run_play(args: PlayArgs) -> Result<()> {
    let config = MatchConfig::resolve(&args)?;
    debug!(?config, "Resolved match configuration");

    let summary = play_match(&config, args.games, args.starter)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_text(&summary));
    }
    Ok(())
}
