//! Notifications emitted by the turn controller.

use crate::types::{Player, Square};
use serde::Serialize;
use std::cell::RefCell;

/// A notification from the turn controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// A game was started with this player to move.
    GameStarted(Player),
    /// The player to move changed.
    ActivePlayerChanged(Player),
    /// A move completed new squares.
    NewSquaresFound {
        /// Player who completed them.
        player: Player,
        /// The new squares.
        squares: Vec<Square>,
    },
    /// The game ended; `None` for a draw.
    GameOver {
        /// Winner of the game.
        winner: Option<Player>,
    },
}

/// Observer of controller notifications.
///
/// Callbacks run synchronously after the controller has released its state,
/// so a listener may query the controller.
pub trait GameListener {
    /// A game was started.
    fn on_game_started(&self, _active: &Player) {}

    /// The player to move changed.
    fn on_active_player_changed(&self, _active: &Player) {}

    /// A move completed new squares.
    fn on_new_squares_found(&self, _player: &Player, _squares: &[Square]) {}

    /// The game ended; `None` for a draw.
    fn on_game_over(&self, _winner: Option<&Player>) {}
}

impl GameEvent {
    /// Delivers this event to `listener`.
    pub fn dispatch(&self, listener: &dyn GameListener) {
        match self {
            GameEvent::GameStarted(player) => listener.on_game_started(player),
            GameEvent::ActivePlayerChanged(player) => listener.on_active_player_changed(player),
            GameEvent::NewSquaresFound { player, squares } => {
                listener.on_new_squares_found(player, squares)
            }
            GameEvent::GameOver { winner } => listener.on_game_over(winner.as_ref()),
        }
    }
}

/// Listener that records every event in order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<GameEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GameListener for EventLog {
    fn on_game_started(&self, active: &Player) {
        self.push(GameEvent::GameStarted(active.clone()));
    }

    fn on_active_player_changed(&self, active: &Player) {
        self.push(GameEvent::ActivePlayerChanged(active.clone()));
    }

    fn on_new_squares_found(&self, player: &Player, squares: &[Square]) {
        self.push(GameEvent::NewSquaresFound {
            player: player.clone(),
            squares: squares.to_vec(),
        });
    }

    fn on_game_over(&self, winner: Option<&Player>) {
        self.push(GameEvent::GameOver {
            winner: winner.cloned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let alice = Player::new("alice").unwrap();
        let log = EventLog::new();
        let started = GameEvent::GameStarted(alice.clone());
        let over = GameEvent::GameOver { winner: None };
        started.dispatch(&log);
        over.dispatch(&log);
        assert_eq!(log.events(), vec![started, over]);
        log.clear();
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_events_serialize() {
        let square = Square::new([0, 1, 8, 9], Player::new("bob").unwrap()).unwrap();
        let event = GameEvent::NewSquaresFound {
            player: square.owner().clone(),
            squares: vec![square],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["NewSquaresFound"]["player"]["name"], "bob");
        assert_eq!(json["NewSquaresFound"]["squares"][0]["score"], 4);
    }
}
