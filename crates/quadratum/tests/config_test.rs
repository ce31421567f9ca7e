//! Tests for match configuration and flag overrides.

use clap::Parser;
use quadratum::{Cli, Command, MatchConfig, PlayArgs};
use quadratum_rules::{ScoringMode, Seat};
use std::io::Write;
use tempfile::NamedTempFile;

fn play_args(flags: &[&str]) -> PlayArgs {
    let argv = ["quadratum", "play"].into_iter().chain(flags.iter().copied());
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Play(args) => args,
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = MatchConfig::default();
    assert_eq!(*config.rules().min_score(), 150);
    assert_eq!(*config.rules().min_difference(), 15);
    assert_eq!(config.first().name(), "first");
    assert_eq!(*config.first().mode(), ScoringMode::Cumulative);
    assert_eq!(*config.second().mode(), ScoringMode::BestOnly);
    assert!(*config.first().randomize());
    assert_eq!(*config.second().seed(), None);
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
[rules]
min_score = 120

[first]
name = "cumulus"
mode = "best-only"
randomize = false

[second]
name = "apex"
seed = 9
"#,
    );
    let config = MatchConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.rules().min_score(), 120);
    assert_eq!(*config.rules().min_difference(), 15);
    assert_eq!(config.first().name(), "cumulus");
    assert_eq!(*config.first().mode(), ScoringMode::BestOnly);
    assert!(!*config.first().randomize());
    assert_eq!(config.second().name(), "apex");
    assert_eq!(*config.second().mode(), ScoringMode::Cumulative);
    assert!(*config.second().randomize());
    assert_eq!(*config.second().seed(), Some(9));
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = config_file("");
    assert_eq!(MatchConfig::from_file(file.path()).unwrap(), MatchConfig::default());
}

#[test]
fn test_bad_file_reports_error() {
    let file = config_file("[first]\nmode = \"sideways\"\n");
    let err = MatchConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"), "{}", err);

    let err = MatchConfig::from_file("/nonexistent/quadratum.toml").unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"), "{}", err);
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_flags_override_file() {
    let file = config_file("[rules]\nmin_difference = 20\n[first]\nname = \"a\"\nseed = 3\n");
    let path = file.path().to_str().unwrap();
    let args = play_args(&[
        "--config",
        path,
        "--second-mode",
        "cumulative",
        "--randomize",
        "false",
        "--seed",
        "40",
        "--min-score",
        "90",
        "--starter",
        "second",
    ]);
    assert_eq!(args.starter, Seat::Second);

    let config = MatchConfig::resolve(&args).unwrap();
    assert_eq!(config.first().name(), "a");
    assert_eq!(*config.second().mode(), ScoringMode::Cumulative);
    assert!(!*config.first().randomize());
    assert!(!*config.second().randomize());
    assert_eq!(*config.first().seed(), Some(40));
    assert_eq!(*config.second().seed(), Some(41));
    assert_eq!(*config.rules().min_score(), 90);
    assert_eq!(*config.rules().min_difference(), 20);
}

#[test]
fn test_flag_defaults() {
    let args = play_args(&[]);
    assert_eq!(args.games, 1);
    assert_eq!(args.starter, Seat::First);
    assert!(!args.json);
    assert!(args.first_mode.is_none());
}

#[test]
fn test_rejects_unknown_mode_flag() {
    let argv = ["quadratum", "play", "--first-mode", "greedy"];
    assert!(Cli::try_parse_from(argv).is_err());
}
