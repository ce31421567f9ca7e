//! The 8x8 game board and its change notifications.

use crate::geometry::{self, CELL_COUNT, GeometryError, Quadruple};
use crate::types::{Player, Seat};
use std::rc::Rc;
use tracing::{debug, instrument};

/// Error raised by board operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum BoardError {
    /// Both seats were given the same player.
    #[display("Player one and player two must be different players")]
    SamePlayer,

    /// Both players share a display name.
    #[display("Player one and player two must not share the name {:?}", _0)]
    SameName(String),

    /// The player is not seated at this board.
    #[display("Player {:?} is not registered at the board", _0)]
    UnknownPlayer(String),

    /// The cell already holds a piece.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),

    /// Invalid cell index.
    #[display("{}", _0)]
    #[from]
    Geometry(GeometryError),
}

impl std::error::Error for BoardError {}

/// Observer of board changes.
///
/// Listeners run while the board is being changed and must not call back into
/// whatever owns the board.
pub trait BoardListener {
    /// A piece was placed at `index`.
    fn on_piece_placed(&self, _index: usize, _player: &Player) {}

    /// All cells were cleared.
    fn on_board_cleared(&self) {}
}

/// Counts of pieces per seat among a set of cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    /// Pieces of player one.
    pub first: u32,
    /// Pieces of player two.
    pub second: u32,
    /// Empty cells.
    pub empty: u32,
}

impl Occupancy {
    /// Returns `(own, opponent)` piece counts from `seat`'s point of view.
    pub fn split(self, seat: Seat) -> (u32, u32) {
        match seat {
            Seat::First => (self.first, self.second),
            Seat::Second => (self.second, self.first),
        }
    }
}

/// The game board: two registered players and 64 cells.
///
/// A non-empty cell never changes owner; only [`Board::clear_all`] empties it.
pub struct Board {
    players: [Player; 2],
    cells: [Option<Seat>; CELL_COUNT],
    listeners: Vec<Rc<dyn BoardListener>>,
}

impl Board {
    /// Creates an empty board for two players.
    ///
    /// # Errors
    ///
    /// Fails if both players are the same player or share a name.
    #[instrument(skip_all, fields(first = %first, second = %second))]
    pub fn new(first: Player, second: Player) -> Result<Self, BoardError> {
        if first == second {
            return Err(BoardError::SamePlayer);
        }
        if first.name() == second.name() {
            return Err(BoardError::SameName(first.name().to_string()));
        }
        Ok(Self {
            players: [first, second],
            cells: [None; CELL_COUNT],
            listeners: Vec::new(),
        })
    }

    /// Returns the player sitting in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Returns player one.
    pub fn first_player(&self) -> &Player {
        self.player(Seat::First)
    }

    /// Returns player two.
    pub fn second_player(&self) -> &Player {
        self.player(Seat::Second)
    }

    /// Returns the seat of `player`, if registered.
    pub fn seat_of(&self, player: &Player) -> Option<Seat> {
        if *player == self.players[0] {
            Some(Seat::First)
        } else if *player == self.players[1] {
            Some(Seat::Second)
        } else {
            None
        }
    }

    /// Returns true if no piece sits at `index`.
    pub fn is_empty(&self, index: usize) -> Result<bool, BoardError> {
        Ok(self.cells[geometry::check_index(index)?].is_none())
    }

    /// Returns the owner of the piece at `index`.
    pub fn piece_at(&self, index: usize) -> Result<Option<&Player>, BoardError> {
        Ok(self.seat_at(index)?.map(|seat| self.player(seat)))
    }

    /// Returns the seat owning the piece at `index`.
    pub fn seat_at(&self, index: usize) -> Result<Option<Seat>, BoardError> {
        Ok(self.cells[geometry::check_index(index)?])
    }

    /// Returns the number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Places a piece for `player` at `index` and notifies listeners.
    ///
    /// # Errors
    ///
    /// Fails if the index is off the board, the player is not registered, or
    /// the cell is occupied.
    #[instrument(skip(self, player), fields(player = %player))]
    pub fn place(&mut self, index: usize, player: &Player) -> Result<(), BoardError> {
        geometry::check_index(index)?;
        let seat = self
            .seat_of(player)
            .ok_or_else(|| BoardError::UnknownPlayer(player.name().to_string()))?;
        if self.cells[index].is_some() {
            return Err(BoardError::Occupied(index));
        }
        self.cells[index] = Some(seat);
        debug!(index, ?seat, "Piece placed");
        for listener in &self.listeners {
            listener.on_piece_placed(index, player);
        }
        Ok(())
    }

    /// Empties every cell and notifies listeners.
    #[instrument(skip(self))]
    pub fn clear_all(&mut self) {
        self.cells = [None; CELL_COUNT];
        for listener in &self.listeners {
            listener.on_board_cleared();
        }
    }

    /// Registers a listener.
    pub fn add_listener(&mut self, listener: Rc<dyn BoardListener>) {
        self.listeners.push(listener);
    }

    /// Removes a previously registered listener.
    pub fn remove_listener(&mut self, listener: &Rc<dyn BoardListener>) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Counts pieces per seat over four on-board cells.
    pub(crate) fn occupancy(&self, cells: Quadruple) -> Occupancy {
        cells
            .iter()
            .fold(Occupancy::default(), |mut acc, &index| {
                match self.cells[index] {
                    Some(Seat::First) => acc.first += 1,
                    Some(Seat::Second) => acc.second += 1,
                    None => acc.empty += 1,
                }
                acc
            })
    }

    /// Returns true if `seat` owns all four cells.
    pub(crate) fn owns_all(&self, seat: Seat, cells: Quadruple) -> bool {
        cells.iter().all(|&index| self.cells[index] == Some(seat))
    }

    /// Copies players and cells without listeners.
    pub fn snapshot(&self) -> Self {
        Self {
            players: self.players.clone(),
            cells: self.cells,
            listeners: Vec::new(),
        }
    }

    /// Formats the board as a grid, `1` and `2` marking the seats.
    pub fn display(&self) -> String {
        self.cells
            .chunks(geometry::BOARD_SIDE as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(Seat::First) => '1',
                        Some(Seat::Second) => '2',
                        None => '.',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("players", &self.players)
            .field("cells", &self.display())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
