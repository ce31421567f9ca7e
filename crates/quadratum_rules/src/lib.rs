//! Rules engine for Quadratum.
//!
//! Two players take turns placing pieces on an 8x8 board. Four pieces of one
//! player at the corners of a square, axis-aligned or tilted, complete that
//! square and score the square of its height in rows. The game ends once a
//! player is far enough ahead or nobody can catch up.
//!
//! # Architecture
//!
//! - [`geometry`]: index arithmetic, completion pairs and square scoring
//! - [`Board`]: the 64 cells and their two registered players
//! - [`SquareDetector`]: incremental discovery of completed squares
//! - [`rules`]: thresholds and the game-over evaluator
//! - [`TurnController`]: the turn state machine driving two strategies
//! - [`players`]: the strategy trait, a heat-map bot and a human adapter
//!
//! # Example
//!
//! ```
//! use quadratum_rules::{Board, HeuristicStrategy, Player, ScoringMode, TurnController};
//! use std::rc::Rc;
//!
//! let one = Player::new("one")?;
//! let two = Player::new("two")?;
//! let board = Board::new(one.clone(), two.clone())?;
//! let controller = TurnController::new(
//!     board,
//!     Rc::new(HeuristicStrategy::new(one.clone(), ScoringMode::Cumulative).with_seed(7)),
//!     Rc::new(HeuristicStrategy::new(two, ScoringMode::BestOnly).with_seed(8)),
//! )?;
//! controller.start(&one)?;
//! assert!(controller.outcome().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod controller;
mod detector;
mod events;
pub mod geometry;
pub mod players;
pub mod rules;
mod types;

pub use board::{Board, BoardError, BoardListener, Occupancy};
pub use controller::{GameError, MoveCallback, TurnController, TurnPhase};
pub use detector::SquareDetector;
pub use events::{EventLog, GameEvent, GameListener};
pub use geometry::{GeometryError, Quadruple};
pub use players::{HeatMaps, HeuristicStrategy, HumanStrategy, PlayerStrategy, ScoringMode};
pub use rules::{GameOverEvaluator, GameOverState, RemainingSquares, RulesConfig, RulesError};
pub use types::{Player, PlayerError, PlayerId, Seat, Square, SquareKey};
