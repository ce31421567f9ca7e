//! Logs controller notifications.

use quadratum_rules::{GameListener, Player, Square};
use tracing::{debug, info};

/// Listener writing every notification to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingListener;

impl GameListener for TracingListener {
    fn on_game_started(&self, active: &Player) {
        info!(starter = %active, "Game started");
    }

    fn on_active_player_changed(&self, active: &Player) {
        debug!(player = %active, "Turn");
    }

    fn on_new_squares_found(&self, player: &Player, squares: &[Square]) {
        for square in squares {
            info!(player = %player, corners = ?square.corners(), score = square.score(), "Square completed");
        }
    }

    fn on_game_over(&self, winner: Option<&Player>) {
        match winner {
            Some(player) => info!(winner = %player, "Game over"),
            None => info!("Game over, draw"),
        }
    }
}
