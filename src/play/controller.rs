//! The board: plays, undo, hints and notifications.
//!
//! A [`Board`] owns its grids, its refill source and its history. Every
//! public operation leaves the grid full and free of runs (unless a scripted
//! refill made a cascade hit the round limit).
//!
//! ## Play Flow
//!
//! ```text
//! start_play ─► adjacent? ─► apply_swap ─► cascade ─► history ─► ScoreFinalized
//!                  │              │
//!              NotAdjacent     NoMatch
//! ```

use tracing::debug;

use crate::cascade::{
    apply_swap, BoardCells, CascadeEngine, CascadeReport, CascadeStep, RefillSource,
};
use crate::core::{BoardConfig, BoardError, GameRng};
use crate::grid::{Grid, Position, Swap};
use crate::tokens::Token;

use super::deadlock::find_move;
use super::events::{BoardEvent, EventKind, ObserverId, ObserverRegistry};
use super::history::History;

/// What `start_play` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayOutcome {
    /// The cells were not neighbors; nothing happened.
    NotAdjacent,
    /// The swap would not clear anything; nothing happened.
    NoMatch,
    /// The swap was played and the board stabilized.
    Committed { score: i64 },
}

impl PlayOutcome {
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Points earned, zero unless committed.
    #[must_use]
    pub fn score(&self) -> i64 {
        match self {
            Self::Committed { score } => *score,
            _ => 0,
        }
    }
}

/// An 8x8 match-three board.
///
/// ## Example
///
/// ```
/// use rust_match3::core::BoardConfig;
/// use rust_match3::matching::has_runs;
/// use rust_match3::play::Board;
///
/// let mut board = Board::new(BoardConfig::new(42));
/// assert!(board.grid().is_full());
/// assert!(!has_runs(board.grid()));
///
/// if let Some(swap) = board.are_moves_left() {
///     let (a, b) = (swap.first, swap.second);
///     let outcome = board.start_play(a.row, a.col, b.row, b.col);
///     assert!(outcome.is_committed());
///     assert_eq!(board.total_score(), outcome.score());
/// }
/// ```
pub struct Board<R = GameRng> {
    cells: BoardCells,
    history: History,
    refill: R,
    config: BoardConfig,
    pending_score: i64,
    total_score: i64,
    undo_allowed: bool,
    observers: ObserverRegistry<Board<R>>,
}

impl Board<GameRng> {
    /// A randomly filled, stabilized board seeded from `config.seed`.
    pub fn new(config: BoardConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let grid = Grid::random(&mut rng);
        Self::with_refill(grid, rng, config)
    }

    /// Start from a given grid; empty cells are filled from the seeded RNG.
    pub fn with_grid(grid: Grid, config: BoardConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_refill(grid, rng, config)
    }

    /// Parse a text grid and build a board from it.
    pub fn from_text(text: &str, config: BoardConfig) -> Result<Self, BoardError> {
        let grid: Grid = text.parse()?;
        Ok(Self::with_grid(grid, config))
    }
}

impl<R: RefillSource> Board<R> {
    /// Start from a given grid and refill source.
    ///
    /// The grid is stabilized first. Points from that are not counted, and
    /// the stabilized grid becomes the first history entry.
    pub fn with_refill(grid: Grid, mut refill: R, config: BoardConfig) -> Self {
        let mut cells = BoardCells::new(grid);
        let report = CascadeEngine::rescanning(config.max_cascade_rounds).run(&mut cells, &mut refill);
        debug!(
            rounds = report.rounds,
            discarded = report.score,
            "initial board stabilized"
        );

        Self {
            history: History::new(cells.grid.clone()),
            cells,
            refill,
            config,
            pending_score: 0,
            total_score: 0,
            undo_allowed: false,
            observers: ObserverRegistry::new(),
        }
    }

    /// Try to swap `(row1, col1)` with `(row2, col2)`.
    ///
    /// Panics if either cell is off the grid. The pending score is reset on
    /// every call; a committed play sets it to the play's score.
    pub fn start_play(&mut self, row1: usize, col1: usize, row2: usize, col2: usize) -> PlayOutcome {
        let swap = Swap::new(Position::new(row1, col1), Position::new(row2, col2));
        self.pending_score = 0;

        if !swap.is_adjacent() {
            debug!(%swap, "ignored non-adjacent swap");
            return PlayOutcome::NotAdjacent;
        }
        let Some(resolution) = apply_swap(&mut self.cells, swap) else {
            return PlayOutcome::NoMatch;
        };

        let report = self.cascade(CascadeEngine::new(self.config.max_cascade_rounds));
        let score = resolution.score + report.score;

        self.pending_score = score;
        self.total_score += score;
        self.history.push(self.cells.grid.clone(), score);
        self.undo_allowed = true;

        debug!(
            %swap,
            score,
            rounds = report.rounds,
            total = self.total_score,
            "play committed"
        );
        self.emit(BoardEvent::ScoreFinalized { score });
        PlayOutcome::Committed { score }
    }

    /// Step a cascade to the end, notifying observers of each visible change.
    fn cascade(&mut self, mut engine: CascadeEngine) -> CascadeReport {
        loop {
            match engine.step(&mut self.cells, &mut self.refill) {
                CascadeStep::Committed | CascadeStep::Settled { .. } => {
                    self.emit(BoardEvent::BoardChanged);
                }
                CascadeStep::Rescanned { .. } => {}
                CascadeStep::Stable | CascadeStep::Halted => return engine.report(),
            }
        }
    }

    /// Take back the last play.
    ///
    /// Allowed once after each committed play. The pending score becomes the
    /// negation of what the undone play earned, and it is taken off the total.
    pub fn undo_play(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(previous) = self.history.next_to_last().map(|snapshot| snapshot.grid.clone()) else {
            return false;
        };
        let Some(undone) = self.history.pop() else {
            return false;
        };

        self.cells = BoardCells::new(previous);
        self.pending_score = -undone.score;
        self.total_score -= undone.score;
        self.undo_allowed = false;

        debug!(score = undone.score, history = self.history.len(), "play undone");
        self.emit(BoardEvent::BoardChanged);
        true
    }

    /// A swap that would clear something, if any.
    ///
    /// Read-only: no score change, no notification, no RNG draw.
    #[must_use]
    pub fn are_moves_left(&self) -> Option<Swap> {
        find_move(&self.cells.grid)
    }

    /// Like [`Board::are_moves_left`], but a found move costs the hint
    /// penalty and notifies `HintGiven`. The last play's pending score is
    /// left alone.
    pub fn hint(&mut self) -> Option<Swap> {
        let swap = find_move(&self.cells.grid)?;
        let penalty = self.config.hint_penalty;
        self.total_score -= penalty;

        debug!(%swap, penalty, total = self.total_score, "hint given");
        self.emit(BoardEvent::HintGiven { swap, penalty });
        Some(swap)
    }

    /// Register an observer for one kind of event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        observer: impl FnMut(&BoardEvent, &Board<R>) + 'static,
    ) -> ObserverId {
        self.observers.subscribe(kind, observer)
    }

    /// Register an observer for every event.
    pub fn subscribe_all(&mut self, observer: impl FnMut(&BoardEvent, &Board<R>) + 'static) -> ObserverId {
        self.observers.subscribe_all(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: BoardEvent) {
        if self.observers.is_empty() {
            return;
        }
        // Observers borrow the board, so the registry is moved out while they run.
        let mut observers = std::mem::take(&mut self.observers);
        observers.dispatch(&event, self);
        self.observers = observers;
    }

    /// Token at a cell. Panics if the cell is off the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        self.cells.grid.get(row, col)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.cells.grid
    }

    /// Score of the last play attempt (negative right after an undo).
    #[must_use]
    pub fn pending_score(&self) -> i64 {
        self.pending_score
    }

    /// Sum of finalized plays, less hint penalties and undone plays.
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_allowed && self.history.len() >= 2
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The refill source, e.g. to capture RNG state.
    #[must_use]
    pub fn refill(&self) -> &R {
        &self.refill
    }
}

impl<R> std::fmt::Debug for Board<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.cells.grid)
            .field("pending_score", &self.pending_score)
            .field("total_score", &self.total_score)
            .field("history", &self.history.len())
            .field("undo_allowed", &self.undo_allowed)
            .field("observers", &self.observers.len())
            .finish()
    }
}
