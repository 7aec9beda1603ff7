//! The stabilization loop.
//!
//! A board holds two grids. The *current* grid is what the player sees; the
//! *candidate* grid is where clears and evolutions land. A cascade repeats
//! three phases until the two agree and nothing is empty:
//!
//! 1. **Commit**: copy the candidate over the current grid
//! 2. **Settle**: drop tokens into empty cells below them, then refill from
//!    the top and sync the candidate
//! 3. **Rescan**: resolve every run on the settled grid into the candidate
//!
//! [`CascadeEngine`] owns no grids. It is stepped against a [`BoardCells`]
//! so the caller can observe the board between steps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::grid::{Grid, Position, Swap, GRID_SIZE};
use crate::matching::{scan_all, scan_around, scan_around_column, Run};
use crate::scoring::{Resolution, Resolver};

use super::refill::RefillSource;

/// The current grid and the candidate grid that resolution writes into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCells {
    pub grid: Grid,
    pub candidate: Grid,
}

impl BoardCells {
    /// Start with the candidate equal to `grid`.
    pub fn new(grid: Grid) -> Self {
        Self {
            candidate: grid.clone(),
            grid,
        }
    }

    /// Nothing pending: the grids agree and no cell is empty.
    #[must_use]
    pub fn is_fixed_point(&self) -> bool {
        self.grid == self.candidate && self.grid.is_full()
    }

    /// Throw away pending changes.
    pub fn reset_candidate(&mut self) {
        self.candidate.clone_from(&self.grid);
    }
}

/// Drop every token as far down its column as it goes.
///
/// Relative order within a column is kept. Returns how many tokens moved.
pub fn apply_gravity(grid: &mut Grid) -> usize {
    let mut moved = 0;
    for col in 0..GRID_SIZE {
        let mut write = GRID_SIZE;
        for row in (0..GRID_SIZE).rev() {
            if let Some(token) = grid.get(row, col) {
                write -= 1;
                if write != row {
                    grid.set(write, col, Some(token));
                    grid.set(row, col, None);
                    moved += 1;
                }
            }
        }
    }
    moved
}

/// Fill empty cells column by column, left to right, top to bottom.
///
/// Returns how many cells were filled.
pub fn refill_empty<R: RefillSource + ?Sized>(grid: &mut Grid, refill: &mut R) -> usize {
    let mut filled = 0;
    for col in 0..GRID_SIZE {
        for row in 0..GRID_SIZE {
            if grid.get(row, col).is_none() {
                grid.set(row, col, Some(refill.next_token()));
                filled += 1;
            }
        }
    }
    filled
}

/// Resolve every run on the current grid into the candidate.
///
/// Returns the number of runs found and what resolving them did. All runs of
/// the round share one resolver, so a cell crossed by two runs scores once.
pub fn clear_runs(cells: &mut BoardCells) -> (usize, Resolution) {
    let runs = scan_all(&cells.grid);
    let mut resolver = Resolver::new(&cells.grid, &mut cells.candidate);
    for run in &runs {
        resolver.resolve_run(run);
    }
    (runs.len(), resolver.finish())
}

/// Try a swap.
///
/// The two cells are exchanged on both grids and only their own rows and
/// columns are scanned, so evolved tokens land on the moved cell. The
/// wildcard rule is applied on top. If nothing triggered, the candidate is
/// swapped back. The current grid is always swapped back: a triggered swap
/// becomes visible only when the cascade commits.
///
/// Returns `None` when the swap triggered nothing.
pub fn apply_swap(cells: &mut BoardCells, swap: Swap) -> Option<Resolution> {
    let Swap { first, second } = swap;
    cells.grid.swap(first, second);
    cells.candidate.swap(first, second);

    let runs = swap_runs(&cells.grid, swap);
    let mut resolver = Resolver::new(&cells.grid, &mut cells.candidate);
    for run in &runs {
        resolver.resolve_run(run);
    }
    let wildcard = resolver.resolve_wildcard_swap(swap);
    let resolution = resolver.finish();

    let triggered = !runs.is_empty() || wildcard;
    if !triggered {
        cells.candidate.swap(first, second);
    }
    cells.grid.swap(first, second);

    debug!(%swap, runs = runs.len(), wildcard, score = resolution.score, "applied swap");
    triggered.then_some(resolution)
}

/// Runs through either moved cell, each span listed once.
fn swap_runs(grid: &Grid, swap: Swap) -> SmallVec<[Run; 4]> {
    let mut runs: SmallVec<[Run; 4]> = SmallVec::new();
    for Position { row, col } in [swap.first, swap.second] {
        for run in [scan_around(grid, row, col), scan_around_column(grid, row, col)]
            .into_iter()
            .flatten()
        {
            let seen = runs.iter().any(|r| {
                r.axis == run.axis && r.line == run.line && r.start == run.start && r.len == run.len
            });
            if !seen {
                runs.push(run);
            }
        }
    }
    runs
}

/// Where a cascade is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadeState {
    /// Not started.
    Unstable,
    /// Between steps.
    Resolving,
    /// Done. Check [`CascadeReport::halted`] for a forced stop.
    Stable,
}

/// What one call to [`CascadeEngine::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeStep {
    /// The candidate was copied over the current grid.
    Committed,
    /// Gravity and refill ran.
    Settled { moved: usize, refilled: usize },
    /// One resolution round over the whole grid.
    Rescanned { runs: usize, resolution: Resolution },
    /// Fixed point reached.
    Stable,
    /// Round limit hit; the board is full but may still hold runs.
    Halted,
}

/// Totals over a whole cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Full-grid resolution rounds.
    pub rounds: usize,
    /// Runs resolved across all rounds.
    pub runs: usize,
    /// Cells emptied across all rounds.
    pub cleared: usize,
    /// Tokens moved by gravity.
    pub moved: usize,
    /// Cells refilled.
    pub refilled: usize,
    /// Points earned by the rounds (not by the triggering swap).
    pub score: i64,
    /// Stopped by the round limit.
    pub halted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Commit,
    Settle,
    Rescan,
}

/// Drives a [`BoardCells`] to a fixed point.
///
/// ## Example
///
/// ```
/// use rust_match3::cascade::{BoardCells, CascadeEngine, ScriptedRefill};
/// use rust_match3::grid::Grid;
///
/// let grid: Grid = "
///     B C K Y P S T B
///     Y P S T B C K Y
///     T B C K Y P S T
///     K Y P S T B C K
///     S T B C K Y P S
///     C K Y P S T B C
///     P S T B C K Y P
///     B C K Y P S T B
/// ".parse().unwrap();
/// let mut cells = BoardCells::new(grid);
/// let mut refill = ScriptedRefill::from_codes("B").unwrap();
///
/// let report = CascadeEngine::new(100).run(&mut cells, &mut refill);
/// assert_eq!(report.rounds, 0);
/// assert_eq!(report.score, 0);
/// ```
#[derive(Clone, Debug)]
pub struct CascadeEngine {
    phase: Phase,
    state: CascadeState,
    max_rounds: usize,
    report: CascadeReport,
}

impl CascadeEngine {
    /// Cascade after a swap: starts by committing the candidate.
    pub fn new(max_rounds: usize) -> Self {
        Self::starting_at(Phase::Commit, max_rounds)
    }

    /// Cascade over a grid that may already hold runs: starts with a rescan.
    pub fn rescanning(max_rounds: usize) -> Self {
        Self::starting_at(Phase::Rescan, max_rounds)
    }

    fn starting_at(phase: Phase, max_rounds: usize) -> Self {
        Self {
            phase,
            state: CascadeState::Unstable,
            max_rounds,
            report: CascadeReport::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> CascadeState {
        self.state
    }

    /// Totals so far.
    #[must_use]
    pub fn report(&self) -> CascadeReport {
        self.report
    }

    /// Advance one phase.
    ///
    /// Once stable, further calls keep returning `Stable` (or `Halted`).
    pub fn step<R: RefillSource + ?Sized>(
        &mut self,
        cells: &mut BoardCells,
        refill: &mut R,
    ) -> CascadeStep {
        if self.state == CascadeState::Stable {
            return if self.report.halted {
                CascadeStep::Halted
            } else {
                CascadeStep::Stable
            };
        }
        self.state = CascadeState::Resolving;

        match self.phase {
            Phase::Commit => {
                if cells.is_fixed_point() {
                    self.state = CascadeState::Stable;
                    debug!(rounds = self.report.rounds, score = self.report.score, "board stable");
                    return CascadeStep::Stable;
                }
                cells.grid.clone_from(&cells.candidate);
                self.phase = Phase::Settle;
                CascadeStep::Committed
            }
            Phase::Settle => {
                let moved = apply_gravity(&mut cells.grid);
                let refilled = refill_empty(&mut cells.grid, refill);
                cells.reset_candidate();
                self.report.moved += moved;
                self.report.refilled += refilled;
                self.phase = Phase::Rescan;
                CascadeStep::Settled { moved, refilled }
            }
            Phase::Rescan => {
                if self.report.rounds >= self.max_rounds {
                    warn!(rounds = self.report.rounds, "cascade round limit reached, halting");
                    self.report.halted = true;
                    self.state = CascadeState::Stable;
                    return CascadeStep::Halted;
                }
                let (runs, resolution) = clear_runs(cells);
                self.report.rounds += 1;
                self.report.runs += runs;
                self.report.cleared += resolution.cleared;
                self.report.score += resolution.score;
                debug!(round = self.report.rounds, runs, score = resolution.score, "cascade round");
                self.phase = Phase::Commit;
                CascadeStep::Rescanned { runs, resolution }
            }
        }
    }

    /// Step until stable.
    pub fn run<R: RefillSource + ?Sized>(
        mut self,
        cells: &mut BoardCells,
        refill: &mut R,
    ) -> CascadeReport {
        while self.state != CascadeState::Stable {
            self.step(cells, refill);
        }
        self.report
    }
}
