//! Command line runner for Quadratum bot matches.
//!
//! Wires two heat-map bots to a turn controller, plays a number of games and
//! reports the result as text or JSON.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod listener;
pub mod runner;

pub use cli::{Cli, Command, PlayArgs};
pub use config::{BotConfig, ConfigError, MatchConfig};
pub use listener::TracingListener;
pub use runner::{GameSummary, MatchSummary, play_match, render_text};
