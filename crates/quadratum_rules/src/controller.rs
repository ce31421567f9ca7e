//! Turn sequencing between two player strategies.
//!
//! The controller owns the board, the square detector and the game-over
//! evaluator. Strategies never touch that state directly: each move request
//! hands the active strategy a board snapshot and a [`MoveCallback`], and the
//! strategy answers through the callback whenever it is ready.
//!
//! Move requests are queued and handed out one at a time. A strategy that
//! answers from inside its own request does not recurse into the next
//! strategy; the outstanding dispatch loop picks the next request up once the
//! current one returns.

use crate::board::{Board, BoardError, BoardListener};
use crate::detector::SquareDetector;
use crate::events::{GameEvent, GameListener};
use crate::geometry::{self, GeometryError};
use crate::players::PlayerStrategy;
use crate::rules::{GameOverEvaluator, GameOverState, RulesConfig, RulesError};
use crate::types::{Player, Seat, Square};
use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, info, instrument, warn};

/// Error raised by the controller and its callbacks.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// A move arrived before the game was started.
    #[display("Game has not been started")]
    NotStarted,

    /// A move arrived after the game ended.
    #[display("Game is already over")]
    GameOver,

    /// The callback belongs to a request that is no longer outstanding.
    #[display("Move request is no longer outstanding")]
    StaleMove,

    /// The controller state was already in use further up the call stack.
    #[display("Controller is busy with another operation")]
    Busy,

    /// The controller no longer exists.
    #[display("Controller has been dropped")]
    ControllerDropped,

    /// The player is not seated at the board.
    #[display("Player {:?} is not registered at the board", _0)]
    UnknownPlayer(String),

    /// Both strategies act for the same player.
    #[display("Both strategies play for the same player")]
    DuplicatePlayer,

    /// A strategy acts for a player other than the one in its seat.
    #[display("Strategy for seat {} does not play for that seat's player", _0)]
    StrategyMismatch(Seat),

    /// No empty cell is left to choose.
    #[display("No empty cell left to play")]
    BoardFull,

    /// Invalid cell index.
    #[display("{}", _0)]
    #[from]
    Geometry(GeometryError),

    /// Board operation failed.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),

    /// Invalid rule thresholds.
    #[display("{}", _0)]
    #[from]
    Rules(RulesError),
}

impl std::error::Error for GameError {}

/// Where the controller is in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No game has been started.
    NotStarted,
    /// Waiting for the player in this seat to move.
    AwaitingMove(Seat),
    /// The game has ended.
    Over {
        /// Seat that made the final move.
        last_mover: Seat,
        /// Final verdict.
        verdict: GameOverState,
    },
}

/// Capability handed to a strategy to submit its move.
///
/// Each callback answers exactly one move request. It stays usable after a
/// rejected move so the strategy can retry, and is refused once its request
/// has been answered or the game was restarted.
#[derive(Clone)]
pub struct MoveCallback {
    shared: Weak<Shared>,
    ticket: u64,
    seat: Seat,
}

impl MoveCallback {
    /// Returns the seat this request is for.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Plays a piece at `index` for the requested seat.
    ///
    /// Returns `Ok(false)` without changing anything if the cell is occupied.
    ///
    /// # Errors
    ///
    /// Fails if the game was not started or is over, the request is stale,
    /// or the index is off the board.
    #[instrument(skip(self), fields(seat = %self.seat))]
    pub fn make_move(&self, index: usize) -> Result<bool, GameError> {
        let shared = self.shared.upgrade().ok_or(GameError::ControllerDropped)?;
        let (accepted, events) = {
            let mut core = shared.core.try_borrow_mut().map_err(|_| GameError::Busy)?;
            core.apply_move(self.ticket, index)?
        };
        fire(&shared, &events);
        if accepted {
            pump(&shared)?;
        }
        Ok(accepted)
    }
}

impl std::fmt::Debug for MoveCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveCallback")
            .field("ticket", &self.ticket)
            .field("seat", &self.seat)
            .finish()
    }
}

struct GameCore {
    board: Board,
    detector: SquareDetector,
    evaluator: GameOverEvaluator,
    phase: TurnPhase,
    ticket: u64,
    pending: Option<Seat>,
}

impl GameCore {
    fn scores(&self) -> [u32; 2] {
        [
            self.detector.total_score(self.board.first_player()),
            self.detector.total_score(self.board.second_player()),
        ]
    }

    fn request(&mut self, seat: Seat) {
        self.phase = TurnPhase::AwaitingMove(seat);
        self.ticket += 1;
        self.pending = Some(seat);
    }

    fn apply_move(&mut self, ticket: u64, index: usize) -> Result<(bool, Vec<GameEvent>), GameError> {
        let seat = match self.phase {
            TurnPhase::NotStarted => return Err(GameError::NotStarted),
            TurnPhase::Over { .. } => return Err(GameError::GameOver),
            TurnPhase::AwaitingMove(seat) => seat,
        };
        if ticket != self.ticket {
            warn!(ticket, current = self.ticket, "Stale move callback");
            return Err(GameError::StaleMove);
        }
        geometry::check_index(index)?;
        if !self.board.is_empty(index)? {
            debug!(index, "Move rejected, cell occupied");
            return Ok((false, Vec::new()));
        }

        let player = self.board.player(seat).clone();
        self.board.place(index, &player)?;

        let mut events = Vec::new();
        let squares = self.detector.scan_for_new_squares(&self.board, &player);
        if !squares.is_empty() {
            events.push(GameEvent::NewSquaresFound {
                player: player.clone(),
                squares,
            });
        }

        let scores = self.scores();
        let verdict = self.evaluator.evaluate(&self.board, scores);
        if verdict.is_over() {
            self.phase = TurnPhase::Over {
                last_mover: seat,
                verdict,
            };
            let winner = verdict.winner().map(|seat| self.board.player(seat).clone());
            info!(?verdict, ?scores, "Game over");
            events.push(GameEvent::GameOver { winner });
        } else {
            let next = seat.other();
            self.request(next);
            events.push(GameEvent::ActivePlayerChanged(self.board.player(next).clone()));
        }
        Ok((true, events))
    }
}

struct Shared {
    core: RefCell<GameCore>,
    strategies: [Rc<dyn PlayerStrategy>; 2],
    listeners: RefCell<Vec<Rc<dyn GameListener>>>,
    dispatching: Cell<bool>,
}

/// Delivers events to a snapshot of the registered listeners.
fn fire(shared: &Shared, events: &[GameEvent]) {
    if events.is_empty() {
        return;
    }
    let listeners = shared.listeners.borrow().clone();
    for event in events {
        debug!(?event, "Notifying listeners");
        for listener in &listeners {
            event.dispatch(listener.as_ref());
        }
    }
}

/// Hands queued move requests to strategies until none is left.
fn pump(shared: &Rc<Shared>) -> Result<(), GameError> {
    if shared.dispatching.replace(true) {
        return Ok(());
    }
    let result = drain_requests(shared);
    shared.dispatching.set(false);
    result
}

fn drain_requests(shared: &Rc<Shared>) -> Result<(), GameError> {
    loop {
        let request = {
            let mut core = shared.core.try_borrow_mut().map_err(|_| GameError::Busy)?;
            let pending = core.pending.take();
            pending.map(|seat| (seat, core.ticket, core.board.snapshot()))
        };
        let Some((seat, ticket, board)) = request else {
            return Ok(());
        };
        let callback = MoveCallback {
            shared: Rc::downgrade(shared),
            ticket,
            seat,
        };
        let strategy = Rc::clone(&shared.strategies[seat.index()]);
        debug!(%seat, ticket, "Requesting move");
        strategy.on_move_requested(&board, callback)?;
    }
}

/// The turn/move state machine.
pub struct TurnController {
    shared: Rc<Shared>,
}

impl TurnController {
    /// Creates a controller with the default thresholds (150 points, 15 lead).
    ///
    /// # Errors
    ///
    /// See [`TurnController::with_rules`].
    pub fn new(
        board: Board,
        first: Rc<dyn PlayerStrategy>,
        second: Rc<dyn PlayerStrategy>,
    ) -> Result<Self, GameError> {
        Self::with_rules(board, first, second, RulesConfig::default().evaluator()?)
    }

    /// Creates a controller for `board` with a strategy per seat.
    ///
    /// # Errors
    ///
    /// Fails if both strategies act for the same player, or a strategy does
    /// not act for the player registered in its seat.
    #[instrument(skip_all, fields(first = %first.player(), second = %second.player()))]
    pub fn with_rules(
        board: Board,
        first: Rc<dyn PlayerStrategy>,
        second: Rc<dyn PlayerStrategy>,
        evaluator: GameOverEvaluator,
    ) -> Result<Self, GameError> {
        if first.player() == second.player() {
            return Err(GameError::DuplicatePlayer);
        }
        if first.player() != board.first_player() {
            return Err(GameError::StrategyMismatch(Seat::First));
        }
        if second.player() != board.second_player() {
            return Err(GameError::StrategyMismatch(Seat::Second));
        }

        let core = GameCore {
            board,
            detector: SquareDetector::new(),
            evaluator,
            phase: TurnPhase::NotStarted,
            ticket: 0,
            pending: None,
        };
        Ok(Self {
            shared: Rc::new(Shared {
                core: RefCell::new(core),
                strategies: [first, second],
                listeners: RefCell::new(Vec::new()),
                dispatching: Cell::new(false),
            }),
        })
    }

    /// Starts a new game with `player` to move first.
    ///
    /// Clears the board and all discovered squares, then requests a move from
    /// `player`'s strategy. Calling it again restarts the game.
    ///
    /// # Errors
    ///
    /// Fails if `player` is not seated at the board, or with the first error
    /// a strategy reports while moves are being requested.
    #[instrument(skip(self, player), fields(player = %player))]
    pub fn start(&self, player: &Player) -> Result<(), GameError> {
        let events = {
            let mut core = self.shared.core.try_borrow_mut().map_err(|_| GameError::Busy)?;
            let seat = core
                .board
                .seat_of(player)
                .ok_or_else(|| GameError::UnknownPlayer(player.name().to_string()))?;
            core.board.clear_all();
            core.detector.reset();
            core.request(seat);
            info!(%seat, "Game started");
            vec![
                GameEvent::GameStarted(player.clone()),
                GameEvent::ActivePlayerChanged(player.clone()),
            ]
        };
        fire(&self.shared, &events);
        pump(&self.shared)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TurnPhase {
        self.shared.core.borrow().phase
    }

    /// Returns true once a game has been started.
    pub fn is_started(&self) -> bool {
        !matches!(self.phase(), TurnPhase::NotStarted)
    }

    /// Returns the final verdict once the game is over.
    pub fn outcome(&self) -> Option<GameOverState> {
        match self.phase() {
            TurnPhase::Over { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    /// Returns the player to move, or the final mover once the game is over.
    pub fn active_player(&self) -> Option<Player> {
        let core = self.shared.core.borrow();
        match core.phase {
            TurnPhase::NotStarted => None,
            TurnPhase::AwaitingMove(seat) | TurnPhase::Over { last_mover: seat, .. } => {
                Some(core.board.player(seat).clone())
            }
        }
    }

    /// Borrows the board. Do not hold the borrow across a move.
    pub fn board(&self) -> Ref<'_, Board> {
        Ref::map(self.shared.core.borrow(), |core| &core.board)
    }

    /// Returns every square discovered in the current game.
    pub fn squares(&self) -> Vec<Square> {
        self.shared.core.borrow().detector.all_squares()
    }

    /// Returns `player`'s score.
    pub fn score(&self, player: &Player) -> u32 {
        self.shared.core.borrow().detector.total_score(player)
    }

    /// Returns the number of squares `player` has completed.
    pub fn square_count(&self, player: &Player) -> usize {
        self.shared.core.borrow().detector.square_count(player)
    }

    /// Registers a listener for controller notifications.
    pub fn add_listener(&self, listener: Rc<dyn GameListener>) {
        self.shared.listeners.borrow_mut().push(listener);
    }

    /// Removes a previously registered listener.
    pub fn remove_listener(&self, listener: &Rc<dyn GameListener>) {
        self.shared
            .listeners
            .borrow_mut()
            .retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Registers a listener for board changes.
    pub fn add_board_listener(&self, listener: Rc<dyn BoardListener>) {
        self.shared.core.borrow_mut().board.add_listener(listener);
    }
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("phase", &self.phase())
            .finish()
    }
}
