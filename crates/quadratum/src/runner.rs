//! Plays matches between two configured bots.

use crate::config::MatchConfig;
use crate::listener::TracingListener;
use anyhow::{Context, Result, bail};
use quadratum_rules::{
    Board, EventLog, GameEvent, GameOverState, Player, Seat, Square, TurnController,
};
use serde::Serialize;
use std::fmt::Write;
use std::rc::Rc;
use tracing::{info, instrument};

/// Result of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    /// One-based game number.
    pub game: u32,
    /// Final verdict.
    pub outcome: GameOverState,
    /// Name of the winner, `None` for a draw.
    pub winner: Option<String>,
    /// Scores of the first and second seat.
    pub scores: [u32; 2],
    /// Squares completed by the first and second seat.
    pub square_counts: [usize; 2],
    /// Pieces placed.
    pub moves: usize,
    /// Squares in the order they were completed.
    pub squares: Vec<Square>,
    /// Final board rendering.
    pub board: String,
}

/// Result of a match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    /// Names of the first and second seat.
    pub players: [String; 2],
    /// Games won by the first and second seat.
    pub wins: [u32; 2],
    /// Drawn games.
    pub draws: u32,
    /// Every game in order.
    pub games: Vec<GameSummary>,
}

/// Plays `games` games with `starter` moving first in each.
///
/// The controller and bots are reused, so a seeded match is reproducible as
/// a whole.
#[instrument(skip(config))]
pub fn play_match(config: &MatchConfig, games: u32, starter: Seat) -> Result<MatchSummary> {
    let one = Player::new(config.first().name().as_str()).context("Invalid first bot name")?;
    let two = Player::new(config.second().name().as_str()).context("Invalid second bot name")?;
    let board = Board::new(one.clone(), two.clone()).context("Invalid player pair")?;
    let evaluator = config.rules().evaluator().context("Invalid rule thresholds")?;

    let controller = TurnController::with_rules(
        board,
        Rc::new(config.first().strategy(one.clone())),
        Rc::new(config.second().strategy(two.clone())),
        evaluator,
    )?;
    let log = Rc::new(EventLog::new());
    controller.add_listener(log.clone());
    controller.add_listener(Rc::new(TracingListener));

    let starter = match starter {
        Seat::First => &one,
        Seat::Second => &two,
    };

    let mut summary = MatchSummary {
        players: [one.name().to_string(), two.name().to_string()],
        wins: [0, 0],
        draws: 0,
        games: Vec::new(),
    };

    for game in 1..=games {
        log.clear();
        controller.start(starter)?;
        let Some(outcome) = controller.outcome() else {
            bail!("Game {} stopped before it was decided", game);
        };

        match outcome.winner() {
            Some(seat) => summary.wins[seat.index()] += 1,
            None => summary.draws += 1,
        }

        let board = controller.board();
        let squares = log
            .events()
            .into_iter()
            .flat_map(|event| match event {
                GameEvent::NewSquaresFound { squares, .. } => squares,
                _ => Vec::new(),
            })
            .collect();
        let result = GameSummary {
            game,
            outcome,
            winner: outcome
                .winner()
                .map(|seat| board.player(seat).name().to_string()),
            scores: [controller.score(&one), controller.score(&two)],
            square_counts: [controller.square_count(&one), controller.square_count(&two)],
            moves: quadratum_rules::geometry::CELL_COUNT - board.empty_count(),
            squares,
            board: board.display(),
        };
        info!(game, winner = ?result.winner, scores = ?result.scores, "Game finished");
        summary.games.push(result);
    }

    Ok(summary)
}

/// Formats a match summary for the terminal.
pub fn render_text(summary: &MatchSummary) -> String {
    let [first, second] = &summary.players;
    let mut out = String::new();
    for game in &summary.games {
        let _ = writeln!(out, "Game {}", game.game);
        let _ = writeln!(out, "{}", game.board);
        let _ = writeln!(
            out,
            "{}: {} points, {} squares",
            first, game.scores[0], game.square_counts[0]
        );
        let _ = writeln!(
            out,
            "{}: {} points, {} squares",
            second, game.scores[1], game.square_counts[1]
        );
        match &game.winner {
            Some(name) => {
                let _ = writeln!(out, "Winner: {} after {} moves", name, game.moves);
            }
            None => {
                let _ = writeln!(out, "Draw after {} moves", game.moves);
            }
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "{} {} - {} {} ({} drawn)",
        first, summary.wins[0], summary.wins[1], second, summary.draws
    );
    out
}
