//! Adapter for an interactive player.

use super::PlayerStrategy;
use crate::board::Board;
use crate::controller::{GameError, MoveCallback};
use crate::geometry;
use crate::types::Player;
use std::cell::RefCell;
use tracing::{debug, instrument};

/// Holds the pending move request until the user picks a cell.
#[derive(Debug)]
pub struct HumanStrategy {
    player: Player,
    pending: RefCell<Option<MoveCallback>>,
}

impl HumanStrategy {
    /// Creates an adapter for `player`.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            pending: RefCell::new(None),
        }
    }

    /// Returns true while a move request is waiting for input.
    pub fn is_player_active(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Submits the user's chosen cell.
    ///
    /// Returns `Ok(false)` if no request is outstanding or the cell is
    /// occupied. A rejected move keeps the request open for another try.
    ///
    /// # Errors
    ///
    /// Fails on an off-board index or if the controller refuses the request.
    #[instrument(skip(self), fields(player = %self.player))]
    pub fn place_piece(&self, index: usize) -> Result<bool, GameError> {
        geometry::check_index(index)?;
        let Some(callback) = self.pending.borrow_mut().take() else {
            debug!("No move requested");
            return Ok(false);
        };
        let accepted = callback.make_move(index)?;
        if !accepted {
            debug!(index, "Move rejected, awaiting another cell");
            *self.pending.borrow_mut() = Some(callback);
        }
        Ok(accepted)
    }
}

impl PlayerStrategy for HumanStrategy {
    fn player(&self) -> &Player {
        &self.player
    }

    fn on_move_requested(&self, _board: &Board, callback: MoveCallback) -> Result<(), GameError> {
        debug!(player = %self.player, "Awaiting input");
        *self.pending.borrow_mut() = Some(callback);
        Ok(())
    }
}
