//! Game rules for Quadratum.
//!
//! Rules are pure functions of the board and the scores; they never mutate
//! anything and are composed by the turn controller.

pub mod config;
pub mod game_over;

pub use config::RulesConfig;
pub use game_over::{GameOverEvaluator, GameOverState, RemainingSquares, RulesError, remaining_squares};
