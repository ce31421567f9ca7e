//! Incremental detection of completed squares.

use crate::board::Board;
use crate::geometry;
use crate::types::{Player, Square, SquareKey};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Accumulates the squares discovered during one game.
///
/// Squares are keyed by canonical corners and owner, so each physical square
/// is recorded once per owning player.
#[derive(Debug, Clone, Default)]
pub struct SquareDetector {
    squares: BTreeMap<SquareKey, Square>,
}

impl SquareDetector {
    /// Creates an empty detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds squares of `player` not seen before and records them.
    ///
    /// Returns only the newly found squares, in root-pair scan order. Calling
    /// again without a board change returns an empty list.
    #[instrument(skip(self, board), fields(player = %player))]
    pub fn scan_for_new_squares(&mut self, board: &Board, player: &Player) -> Vec<Square> {
        let Some(seat) = board.seat_of(player) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for &candidate in geometry::candidate_squares() {
            if !board.owns_all(seat, candidate) {
                continue;
            }
            // Candidates come from the geometry table and are always valid.
            let Ok(square) = Square::new(candidate, player.clone()) else {
                continue;
            };
            let key = square.key();
            if self.squares.contains_key(&key) {
                continue;
            }
            self.squares.insert(key, square.clone());
            found.push(square);
        }

        if !found.is_empty() {
            debug!(count = found.len(), "New squares found");
        }
        found
    }

    /// Sum of the scores of `player`'s squares.
    pub fn total_score(&self, player: &Player) -> u32 {
        self.owned_by(player).map(Square::score).sum()
    }

    /// Number of squares owned by `player`.
    pub fn square_count(&self, player: &Player) -> usize {
        self.owned_by(player).count()
    }

    /// All discovered squares of both players.
    pub fn all_squares(&self) -> Vec<Square> {
        self.squares.values().cloned().collect()
    }

    /// Forgets every discovered square. The board is not touched.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares.clear();
    }

    fn owned_by<'a>(&'a self, player: &'a Player) -> impl Iterator<Item = &'a Square> + 'a {
        self.squares.values().filter(move |square| square.owner() == player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Board, Player, Player) {
        let one = Player::new("one").unwrap();
        let two = Player::new("two").unwrap();
        let board = Board::new(one.clone(), two.clone()).unwrap();
        (board, one, two)
    }

    #[test]
    fn test_empty_board_has_no_squares() {
        let (board, one, _) = setup();
        let mut detector = SquareDetector::new();
        assert!(detector.scan_for_new_squares(&board, &one).is_empty());
    }

    #[test]
    fn test_unit_square_found_once() {
        let (mut board, one, _) = setup();
        for index in [0, 1, 8, 9] {
            board.place(index, &one).unwrap();
        }
        let mut detector = SquareDetector::new();
        let found = detector.scan_for_new_squares(&board, &one);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].corners(), [0, 1, 8, 9]);
        assert_eq!(found[0].score(), 4);
        assert!(detector.scan_for_new_squares(&board, &one).is_empty());
    }

    #[test]
    fn test_mixed_owners_do_not_count() {
        let (mut board, one, two) = setup();
        for index in [0, 1, 8] {
            board.place(index, &one).unwrap();
        }
        board.place(9, &two).unwrap();
        let mut detector = SquareDetector::new();
        assert!(detector.scan_for_new_squares(&board, &one).is_empty());
        assert!(detector.scan_for_new_squares(&board, &two).is_empty());
    }

    #[test]
    fn test_reset_forgets_squares() {
        let (mut board, one, two) = setup();
        for index in [0, 1, 8, 9] {
            board.place(index, &one).unwrap();
        }
        let mut detector = SquareDetector::new();
        detector.scan_for_new_squares(&board, &one);
        assert_eq!(detector.total_score(&one), 4);
        assert_eq!(detector.square_count(&one), 1);
        assert_eq!(detector.total_score(&two), 0);

        detector.reset();
        assert!(detector.all_squares().is_empty());
        assert_eq!(detector.scan_for_new_squares(&board, &one).len(), 1);
    }
}
