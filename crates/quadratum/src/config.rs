//! Match configuration loaded from TOML.
//!
//! ```toml
//! [rules]
//! min_score = 150
//! min_difference = 15
//!
//! [first]
//! name = "cumulus"
//! mode = "cumulative"
//! randomize = false
//!
//! [second]
//! name = "apex"
//! mode = "best-only"
//! seed = 7
//! ```

use crate::cli::PlayArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use quadratum_rules::{HeuristicStrategy, Player, RulesConfig, ScoringMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings of one bot.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Display name of the bot's player.
    name: String,

    /// How heat-map contributions are combined.
    #[serde(default)]
    mode: ScoringMode,

    /// Whether ties are broken randomly.
    #[serde(default = "default_randomize")]
    randomize: bool,

    /// Seed for tie-breaking; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_randomize() -> bool {
    true
}

fn default_first() -> BotConfig {
    BotConfig::new("first", ScoringMode::Cumulative)
}

fn default_second() -> BotConfig {
    BotConfig::new("second", ScoringMode::BestOnly)
}

impl BotConfig {
    /// Creates a bot configuration with randomized ties and no seed.
    pub fn new(name: impl Into<String>, mode: ScoringMode) -> Self {
        Self {
            name: name.into(),
            mode,
            randomize: default_randomize(),
            seed: None,
        }
    }

    /// Builds the bot for `player`.
    #[instrument(skip(self, player), fields(player = %player, mode = %self.mode))]
    pub fn strategy(&self, player: Player) -> HeuristicStrategy {
        let bot = HeuristicStrategy::new(player, self.mode).with_randomized_ties(self.randomize);
        match self.seed {
            Some(seed) => bot.with_seed(seed),
            None => bot,
        }
    }
}

/// Complete configuration of a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Winning thresholds.
    #[serde(default)]
    rules: RulesConfig,

    /// Bot in the first seat.
    #[serde(default = "default_first")]
    first: BotConfig,

    /// Bot in the second seat.
    #[serde(default = "default_second")]
    second: BotConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            first: default_first(),
            second: default_second(),
        }
    }
}

impl MatchConfig {
    /// Creates a configuration from its parts.
    pub fn new(rules: RulesConfig, first: BotConfig, second: BotConfig) -> Self {
        Self {
            rules,
            first,
            second,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(first = %config.first.name, second = %config.second.name, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the configuration for a `play` invocation.
    ///
    /// Starts from the file named by `--config` (or defaults) and applies
    /// every flag that was given.
    #[instrument(skip(args))]
    pub fn resolve(args: &PlayArgs) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(args))
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, args: &PlayArgs) -> Self {
        if let Some(mode) = args.first_mode {
            self.first.mode = mode;
        }
        if let Some(mode) = args.second_mode {
            self.second.mode = mode;
        }
        if let Some(randomize) = args.randomize {
            self.first.randomize = randomize;
            self.second.randomize = randomize;
        }
        if let Some(seed) = args.seed {
            self.first.seed = Some(seed);
            self.second.seed = Some(seed.wrapping_add(1));
        }
        if args.min_score.is_some() || args.min_difference.is_some() {
            self.rules = RulesConfig::new(
                args.min_score.unwrap_or(*self.rules.min_score()),
                args.min_difference.unwrap_or(*self.rules.min_difference()),
            );
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
