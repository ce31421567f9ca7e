//! Square geometry on the 8x8 grid.
//!
//! Cells are addressed by a row-major index (`index = y * 8 + x`). Given two
//! cells, the completion pair is obtained by rotating the vector between them
//! by 90 degrees; the four cells then form a (possibly tilted) square.

use std::sync::OnceLock;
use tracing::instrument;

/// Number of cells along one side of the board.
pub const BOARD_SIDE: i32 = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 64;

/// Root pairs `(i, j)` with `i` past this bound never complete a square.
const ROOT_BOUND: usize = 55;

/// Four cell indices forming the corners of a square.
pub type Quadruple = [usize; 4];

/// Error raised by geometry operations on invalid input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GeometryError {
    /// Cell index outside `0..=63`.
    #[display("Cell index {} is outside 0..=63", _0)]
    IndexOutOfRange(usize),

    /// Coordinate outside `0..=7` on either axis.
    #[display("Coordinate ({}, {}) is outside the 8x8 board", x, y)]
    CoordinateOutOfRange {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },

    /// Root pair given in descending order.
    #[display("Root pair ({}, {}) must be given in ascending order", first, second)]
    UnorderedPair {
        /// First index of the pair.
        first: usize,
        /// Second index of the pair.
        second: usize,
    },

    /// Four cells that do not form a square.
    #[display("Cells {:?} do not form a square", _0)]
    NotASquare(Quadruple),
}

impl std::error::Error for GeometryError {}

/// Fails unless `index` addresses a cell on the board.
pub fn check_index(index: usize) -> Result<usize, GeometryError> {
    if index < CELL_COUNT {
        Ok(index)
    } else {
        Err(GeometryError::IndexOutOfRange(index))
    }
}

/// Converts `(x, y)` coordinates to a cell index.
#[instrument(level = "trace")]
pub fn to_index(x: i32, y: i32) -> Result<usize, GeometryError> {
    if !(0..BOARD_SIDE).contains(&x) || !(0..BOARD_SIDE).contains(&y) {
        return Err(GeometryError::CoordinateOutOfRange { x, y });
    }
    Ok((y * BOARD_SIDE + x) as usize)
}

/// Converts a cell index to `(x, y)` coordinates.
#[instrument(level = "trace")]
pub fn to_coords(index: usize) -> Result<(i32, i32), GeometryError> {
    let index = check_index(index)? as i32;
    Ok((index % BOARD_SIDE, index / BOARD_SIDE))
}

/// Signed column delta from `from` to `to`.
pub fn dist_x(from: usize, to: usize) -> Result<i32, GeometryError> {
    Ok(to_coords(to)?.0 - to_coords(from)?.0)
}

/// Signed row delta from `from` to `to`.
pub fn dist_y(from: usize, to: usize) -> Result<i32, GeometryError> {
    Ok(to_coords(to)?.1 - to_coords(from)?.1)
}

/// Returns the two cells completing a square with the root pair.
///
/// The root pair must be ascending. Returns `None` when both indices are the
/// same cell or when either companion falls off the board.
///
/// # Errors
///
/// Fails if either index is off the board or `first > second`.
#[instrument(level = "trace")]
pub fn completion_pair(first: usize, second: usize) -> Result<Option<(usize, usize)>, GeometryError> {
    check_index(first)?;
    check_index(second)?;
    if first > second {
        return Err(GeometryError::UnorderedPair { first, second });
    }

    let (x1, y1) = to_coords(first)?;
    let (x2, y2) = to_coords(second)?;
    let (dx, dy) = (x2 - x1, y2 - y1);
    if dx == 0 && dy == 0 {
        return Ok(None);
    }

    // Vertical pairs (dx == 0) rotate the same way as leftward pairs.
    let sign = if dx > 0 { 1 } else { -1 };
    let third = (x1 - sign * dy, y1 + sign * dx);
    let fourth = (x2 - sign * dy, y2 + sign * dx);

    match (to_index(third.0, third.1), to_index(fourth.0, fourth.1)) {
        (Ok(p), Ok(q)) => Ok(Some((p, q))),
        _ => Ok(None),
    }
}

/// Scores a square as the square of its height in rows.
///
/// A unit square scores 4 and the corner-to-corner square scores 64.
pub fn square_score(corners: Quadruple) -> Result<u32, GeometryError> {
    for &corner in &corners {
        check_index(corner)?;
    }
    let min = corners.iter().copied().min().unwrap_or_default();
    let max = corners.iter().copied().max().unwrap_or_default();
    let side = dist_y(min, max)?.unsigned_abs() + 1;
    Ok(side * side)
}

/// Returns true if the four cells, in any order, form a square.
///
/// After sorting, the first two cells must be a root pair whose completion
/// pair is exactly the remaining two.
pub fn is_square(corners: Quadruple) -> Result<bool, GeometryError> {
    let mut sorted = corners;
    sorted.sort_unstable();
    let Some((p, q)) = completion_pair(sorted[0], sorted[1])? else {
        return Ok(false);
    };
    Ok((p == sorted[2] && q == sorted[3]) || (q == sorted[2] && p == sorted[3]))
}

/// Sorts a quadruple into its canonical ascending form.
pub fn canonical(corners: Quadruple) -> Quadruple {
    let mut sorted = corners;
    sorted.sort_unstable();
    sorted
}

/// Every root pair with a completion pair, as `[i, j, p, q]`.
///
/// Ordered by `i` ascending, then `j` ascending. Squares appear once per root
/// pair that generates them, so most squares appear twice.
pub fn candidate_squares() -> &'static [Quadruple] {
    static CANDIDATES: OnceLock<Vec<Quadruple>> = OnceLock::new();
    CANDIDATES.get_or_init(|| {
        let mut candidates = Vec::new();
        for i in 0..ROOT_BOUND {
            for j in (i + 1)..CELL_COUNT {
                if let Ok(Some((p, q))) = completion_pair(i, j) {
                    candidates.push([i, j, p, q]);
                }
            }
        }
        candidates
    })
}
