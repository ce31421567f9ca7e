//! Core domain types for Quadratum.

use crate::geometry::{self, GeometryError, Quadruple};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::instrument;

static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

/// One of the two seats at the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Seat {
    /// Player one.
    First,
    /// Player two.
    Second,
}

impl Seat {
    /// Returns the opposing seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Position of this seat in two-element arrays.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// Opaque identity of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(u64);

/// Error creating a player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlayerError {
    /// The display name was empty.
    #[display("Player name must not be empty")]
    EmptyName,
}

impl std::error::Error for PlayerError {}

/// A participant in the game.
///
/// Players compare by identity: every call to [`Player::new`] yields a player
/// distinct from all others, even one with the same name. A clone keeps the
/// identity it was cloned from.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
}

impl Player {
    /// Creates a player with a fresh identity.
    #[instrument(skip(name))]
    pub fn new(name: impl Into<String>) -> Result<Self, PlayerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PlayerError::EmptyName);
        }
        Ok(Self {
            id: PlayerId(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed)),
            name,
        })
    }

    /// Returns the player's identity.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Deduplication key of a square: canonical corners plus owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareKey {
    corners: Quadruple,
    owner: PlayerId,
}

/// Four same-player pieces at the corners of a square.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    corners: Quadruple,
    owner: Player,
    score: u32,
}

impl Square {
    /// Creates a square owned by `owner`.
    ///
    /// Corners may be given in any order; they are stored sorted.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::NotASquare`] if the cells do not form a
    /// square, or with a range error for off-board cells.
    pub fn new(corners: Quadruple, owner: Player) -> Result<Self, GeometryError> {
        let corners = geometry::canonical(corners);
        if !geometry::is_square(corners)? {
            return Err(GeometryError::NotASquare(corners));
        }
        Ok(Self {
            corners,
            score: geometry::square_score(corners)?,
            owner,
        })
    }

    /// Returns the corners sorted ascending.
    pub fn corners(&self) -> Quadruple {
        self.corners
    }

    /// Returns the player who owns the square.
    pub fn owner(&self) -> &Player {
        &self.owner
    }

    /// Returns the score of the square.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the deduplication key.
    pub fn key(&self) -> SquareKey {
        SquareKey {
            corners: self.corners,
            owner: self.owner.id(),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} ({} points)",
            self.owner, self.corners, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_compare_by_identity() {
        let a = Player::new("alice").unwrap();
        let b = Player::new("alice").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(Player::new(""), Err(PlayerError::EmptyName));
    }

    #[test]
    fn test_square_sorts_corners() {
        let owner = Player::new("p").unwrap();
        let square = Square::new([9, 1, 8, 0], owner).unwrap();
        assert_eq!(square.corners(), [0, 1, 8, 9]);
        assert_eq!(square.score(), 4);
    }

    #[test]
    fn test_square_rejects_non_square() {
        let owner = Player::new("p").unwrap();
        assert_eq!(
            Square::new([0, 1, 5, 2], owner),
            Err(GeometryError::NotASquare([0, 1, 2, 5]))
        );
    }

    #[test]
    fn test_seat_other() {
        assert_eq!(Seat::First.other(), Seat::Second);
        assert_eq!(Seat::Second.other().index(), 0);
        assert_eq!("second".parse::<Seat>().unwrap(), Seat::Second);
    }
}
