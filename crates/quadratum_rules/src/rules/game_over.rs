//! Game-over evaluation.

use crate::board::Board;
use crate::geometry;
use crate::types::Seat;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Error constructing an evaluator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// Minimum winning score was zero.
    #[display("Minimum score must be greater than zero")]
    ZeroMinScore,

    /// Minimum winning lead was zero.
    #[display("Minimum score difference must be greater than zero")]
    ZeroMinDifference,
}

impl std::error::Error for RulesError {}

/// Verdict of a game-over check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverState {
    /// Play continues.
    NotOver,
    /// The player in this seat won.
    Won(Seat),
    /// Equal scores with no squares left to make.
    Draw,
}

impl GameOverState {
    /// Returns true once the game has been decided.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOverState::NotOver)
    }

    /// Returns the winning seat, if any.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            GameOverState::Won(seat) => Some(*seat),
            _ => None,
        }
    }
}

/// Which players can still complete at least one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemainingSquares {
    /// Both players.
    Both,
    /// Only player one.
    OnlyFirst,
    /// Only player two.
    OnlySecond,
    /// Nobody.
    Neither,
}

/// Decides whether a game is over and who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverEvaluator {
    min_score: u32,
    min_difference: u32,
}

impl GameOverEvaluator {
    /// Creates an evaluator.
    ///
    /// A player wins outright once either score reaches `min_score` and the
    /// lead is at least `min_difference`.
    ///
    /// # Errors
    ///
    /// Fails if either threshold is zero.
    #[instrument]
    pub fn new(min_score: u32, min_difference: u32) -> Result<Self, RulesError> {
        if min_score == 0 {
            return Err(RulesError::ZeroMinScore);
        }
        if min_difference == 0 {
            return Err(RulesError::ZeroMinDifference);
        }
        Ok(Self {
            min_score,
            min_difference,
        })
    }

    /// Returns the minimum winning score.
    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    /// Returns the minimum winning lead.
    pub fn min_difference(&self) -> u32 {
        self.min_difference
    }

    /// Evaluates the board given the scores of player one and player two.
    #[instrument(skip(self, board))]
    pub fn evaluate(&self, board: &Board, scores: [u32; 2]) -> GameOverState {
        let [first, second] = scores;

        if first >= self.min_score || second >= self.min_score {
            let lead = i64::from(first) - i64::from(second);
            let needed = i64::from(self.min_difference);
            if lead >= needed {
                return GameOverState::Won(Seat::First);
            }
            if lead <= -needed {
                return GameOverState::Won(Seat::Second);
            }
        }

        let remaining = remaining_squares(board);
        debug!(?remaining, "Remaining squares classified");
        match remaining {
            RemainingSquares::Both => GameOverState::NotOver,
            RemainingSquares::Neither => {
                if first > second {
                    GameOverState::Won(Seat::First)
                } else if second > first {
                    GameOverState::Won(Seat::Second)
                } else {
                    GameOverState::Draw
                }
            }
            // The only player still able to score wins once ahead.
            RemainingSquares::OnlyFirst if first > second => GameOverState::Won(Seat::First),
            RemainingSquares::OnlySecond if second > first => GameOverState::Won(Seat::Second),
            RemainingSquares::OnlyFirst | RemainingSquares::OnlySecond => GameOverState::NotOver,
        }
    }
}

/// Scans every candidate square for one a player could still complete.
///
/// A candidate is open to a player when it holds at least one empty cell and
/// no opposing piece. A fully empty candidate is open to both, which ends the
/// scan immediately.
pub fn remaining_squares(board: &Board) -> RemainingSquares {
    let mut first_can = false;
    let mut second_can = false;

    for &candidate in geometry::candidate_squares() {
        let occupancy = board.occupancy(candidate);
        if occupancy.empty == 0 {
            continue;
        }
        match (occupancy.first > 0, occupancy.second > 0) {
            (false, false) => return RemainingSquares::Both,
            (true, false) => first_can = true,
            (false, true) => second_can = true,
            (true, true) => {}
        }
        if first_can && second_can {
            return RemainingSquares::Both;
        }
    }

    match (first_can, second_can) {
        (true, true) => RemainingSquares::Both,
        (true, false) => RemainingSquares::OnlyFirst,
        (false, true) => RemainingSquares::OnlySecond,
        (false, false) => RemainingSquares::Neither,
    }
}
