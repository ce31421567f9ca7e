//! Player strategies: the decision makers behind each seat.
//!
//! The controller asks the strategy of the active seat for a move by passing
//! it a board snapshot and a [`MoveCallback`]. A strategy may answer at once
//! (bots) or keep the callback and answer later (interactive players).

mod heuristic;
mod human;

pub use heuristic::{HeatMaps, HeuristicStrategy, ScoringMode};
pub use human::HumanStrategy;

use crate::board::Board;
use crate::controller::{GameError, MoveCallback};
use crate::types::Player;

/// Something that chooses moves for one player.
pub trait PlayerStrategy {
    /// The player this strategy acts for.
    fn player(&self) -> &Player;

    /// Called when it is this strategy's turn.
    ///
    /// `board` is a snapshot taken at request time.
    ///
    /// # Errors
    ///
    /// Errors are propagated to whoever triggered the request.
    fn on_move_requested(&self, board: &Board, callback: MoveCallback) -> Result<(), GameError>;
}
