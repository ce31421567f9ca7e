//! Tests for board geometry and square scoring.

use quadratum_rules::geometry::{
    self, CELL_COUNT, candidate_squares, completion_pair, is_square, square_score,
};
use quadratum_rules::GeometryError;

#[test]
fn test_scores_by_height() {
    assert_eq!(square_score([0, 1, 8, 9]), Ok(4));
    assert_eq!(square_score([9, 19, 24, 34]), Ok(16));
    assert_eq!(square_score([0, 7, 56, 63]), Ok(64));
    assert_eq!(square_score([1, 8, 10, 17]), Ok(9));
}

#[test]
fn test_score_rejects_off_board_corner() {
    assert_eq!(
        square_score([0, 1, 8, 64]),
        Err(GeometryError::IndexOutOfRange(64))
    );
}

#[test]
fn test_is_square_ignores_order() {
    let corners = [9, 19, 24, 34];
    let orders = [
        [9, 19, 24, 34],
        [34, 24, 19, 9],
        [19, 34, 9, 24],
        [24, 9, 34, 19],
    ];
    for order in orders {
        assert_eq!(is_square(order), Ok(true), "order {order:?}");
    }
    assert_eq!(geometry::canonical([34, 9, 24, 19]), corners);
}

#[test]
fn test_is_square_rejects_non_squares() {
    assert_eq!(is_square([0, 1, 2, 3]), Ok(false));
    assert_eq!(is_square([0, 1, 8, 10]), Ok(false));
    assert_eq!(is_square([0, 0, 0, 0]), Ok(false));
}

#[test]
fn test_tilted_square_completion() {
    // Knight-move root pair: (1, 1) to (3, 2).
    assert_eq!(completion_pair(9, 19), Ok(Some((24, 34))));
    // Completion would leave the board past the left edge.
    assert_eq!(completion_pair(0, 9), Ok(None));
    assert_eq!(completion_pair(7, 14), Ok(None));
}

#[test]
fn test_every_completion_forms_a_square() {
    for first in 0..CELL_COUNT {
        for second in first..CELL_COUNT {
            if let Some((p, q)) = completion_pair(first, second).unwrap() {
                assert_eq!(
                    is_square([first, second, p, q]),
                    Ok(true),
                    "root pair ({first}, {second})"
                );
            }
        }
    }
}

#[test]
fn test_candidate_table_is_ordered_and_valid() {
    let candidates = candidate_squares();
    assert!(candidates.windows(2).all(|w| (w[0][0], w[0][1]) < (w[1][0], w[1][1])));
    for &candidate in candidates {
        assert_eq!(is_square(candidate), Ok(true));
    }
}

#[test]
fn test_every_square_appears_twice() {
    let mut counts = std::collections::BTreeMap::new();
    for &candidate in candidate_squares() {
        *counts.entry(geometry::canonical(candidate)).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 336);
    assert!(counts.values().all(|&n| n == 2));
}
