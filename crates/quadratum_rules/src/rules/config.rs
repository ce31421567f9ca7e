//! Rule thresholds loaded from configuration.

use super::game_over::{GameOverEvaluator, RulesError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Winning thresholds for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Score at which a sufficient lead wins outright.
    #[serde(default = "default_min_score")]
    min_score: u32,

    /// Lead required once the score threshold is reached.
    #[serde(default = "default_min_difference")]
    min_difference: u32,
}

fn default_min_score() -> u32 {
    150
}

fn default_min_difference() -> u32 {
    15
}

impl RulesConfig {
    /// Creates a configuration with explicit thresholds.
    pub fn new(min_score: u32, min_difference: u32) -> Self {
        Self {
            min_score,
            min_difference,
        }
    }

    /// Builds the evaluator for these thresholds.
    #[instrument]
    pub fn evaluator(&self) -> Result<GameOverEvaluator, RulesError> {
        GameOverEvaluator::new(self.min_score, self.min_difference)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new(default_min_score(), default_min_difference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(*config.min_score(), 150);
        assert_eq!(*config.min_difference(), 15);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert_eq!(
            RulesConfig::new(150, 0).evaluator(),
            Err(RulesError::ZeroMinDifference)
        );
    }
}
