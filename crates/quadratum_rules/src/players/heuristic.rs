//! Heat-map bot.
//!
//! Every candidate square is weighted by its score and by how many of its
//! cells one side already holds. Squares still open to the bot feed the own
//! map; squares only the opponent can finish feed the opponent map. The bot
//! plays the empty cell with the highest value in either map, which covers
//! both building its own squares and blocking the opponent's.

use super::PlayerStrategy;
use crate::board::Board;
use crate::controller::{GameError, MoveCallback};
use crate::geometry::{self, CELL_COUNT};
use crate::types::{Player, Seat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tracing::{debug, instrument, warn};

/// How contributions of several squares to one cell are combined.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ScoringMode {
    /// Sum every contribution.
    #[default]
    Cumulative,
    /// Keep only the largest contribution.
    BestOnly,
}

impl ScoringMode {
    /// Folds `contribution` into a cell's `current` value.
    pub fn merge(self, current: u32, contribution: u32) -> u32 {
        match self {
            ScoringMode::Cumulative => current.saturating_add(contribution),
            ScoringMode::BestOnly => current.max(contribution),
        }
    }
}

/// Per-cell values from the bot's and the opponent's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatMaps {
    own: [u32; CELL_COUNT],
    opponent: [u32; CELL_COUNT],
}

impl HeatMaps {
    /// Value of `cell` for building the bot's own squares.
    pub fn own(&self, cell: usize) -> u32 {
        self.own[cell]
    }

    /// Value of `cell` for blocking the opponent.
    pub fn opponent(&self, cell: usize) -> u32 {
        self.opponent[cell]
    }

    /// Combined value of `cell`.
    pub fn value(&self, cell: usize) -> u32 {
        self.own[cell].max(self.opponent[cell])
    }
}

/// Bot choosing cells from square heat maps.
#[derive(Debug)]
pub struct HeuristicStrategy {
    player: Player,
    mode: ScoringMode,
    randomize: bool,
    rng: RefCell<StdRng>,
}

impl HeuristicStrategy {
    /// Creates a bot for `player` with randomized tie-breaking.
    pub fn new(player: Player, mode: ScoringMode) -> Self {
        Self {
            player,
            mode,
            randomize: true,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Enables or disables randomized tie-breaking.
    ///
    /// Without it ties always go to the lowest cell index.
    pub fn with_randomized_ties(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    /// Seeds the tie-breaking generator for reproducible games.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Returns the scoring mode.
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Returns true if ties are broken randomly.
    pub fn randomizes_ties(&self) -> bool {
        self.randomize
    }

    /// Builds both heat maps for the player in `seat`.
    ///
    /// # Errors
    ///
    /// Only fails on a corrupt candidate table.
    pub fn heat_maps(&self, board: &Board, seat: Seat) -> Result<HeatMaps, GameError> {
        let mut maps = HeatMaps {
            own: [0; CELL_COUNT],
            opponent: [0; CELL_COUNT],
        };

        for &candidate in geometry::candidate_squares() {
            let (own, opponent) = board.occupancy(candidate).split(seat);
            let score = geometry::square_score(candidate)?;
            let (map, contribution) = match (own, opponent) {
                (0, opponent) if opponent > 0 => (&mut maps.opponent, score * (opponent + 1)),
                (own, 0) => (&mut maps.own, score * (own + 1)),
                _ => continue,
            };
            for &cell in &candidate {
                map[cell] = self.mode.merge(map[cell], contribution);
            }
        }
        Ok(maps)
    }

    /// Picks the empty cell to play.
    ///
    /// # Errors
    ///
    /// Fails if this bot's player is not seated at `board` or no cell is
    /// empty.
    #[instrument(skip(self, board), fields(player = %self.player, mode = %self.mode))]
    pub fn choose_move(&self, board: &Board) -> Result<usize, GameError> {
        let seat = board
            .seat_of(&self.player)
            .ok_or_else(|| GameError::UnknownPlayer(self.player.name().to_string()))?;
        let maps = self.heat_maps(board, seat)?;

        let mut best: Option<(usize, u32)> = None;
        for cell in 0..CELL_COUNT {
            if !board.is_empty(cell)? {
                continue;
            }
            let value = maps.value(cell);
            best = match best {
                Some((_, top)) if value < top => best,
                Some((_, top)) if value == top && !self.coin_flip() => best,
                _ => Some((cell, value)),
            };
        }

        let (cell, value) = best.ok_or(GameError::BoardFull)?;
        debug!(cell, value, "Move chosen");
        Ok(cell)
    }

    fn coin_flip(&self) -> bool {
        self.randomize && self.rng.borrow_mut().gen_bool(0.5)
    }
}

impl PlayerStrategy for HeuristicStrategy {
    fn player(&self) -> &Player {
        &self.player
    }

    fn on_move_requested(&self, board: &Board, callback: MoveCallback) -> Result<(), GameError> {
        let cell = self.choose_move(board)?;
        if !callback.make_move(cell)? {
            warn!(cell, "Chosen cell was rejected");
        }
        Ok(())
    }
}
