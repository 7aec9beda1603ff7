//! # rust-match3
//!
//! Rules engine for an 8x8 match-three board with evolving tokens.
//!
//! ## Rules in Brief
//!
//! 1. **Swaps**: two orthogonally adjacent cells may be swapped. The swap
//!    stands only if it completes a run of three or more same-species tokens
//!    through a moved cell, or moves the wildcard.
//!
//! 2. **Clears**: cleared cells score 10. Evolved tokens chain: a first
//!    evolution also clears its eight neighbors, a second evolution its whole
//!    row and column.
//!
//! 3. **Evolution**: runs of four, five and six leave behind a first
//!    evolution, the wildcard and a second evolution respectively.
//!
//! 4. **Cascades**: after a play, tokens fall, the board refills from the top
//!    and new runs resolve, until nothing changes.
//!
//! ## Architecture
//!
//! - **Two Grids**: the current grid is what players see; clears land in a
//!   candidate grid and become visible when a cascade commits.
//!
//! - **Seeded Refills**: each board owns a ChaCha8 generator, so a seed and a
//!   list of plays replay exactly.
//!
//! - **Persistent History**: undo snapshots share structure via `im-rs`.
//!
//! ## Modules
//!
//! - `core`: configuration, errors, RNG
//! - `tokens`: species, evolution stages, the wildcard
//! - `grid`: positions, swaps, the grid container
//! - `matching`: run detection
//! - `scoring`: point values and clear resolution
//! - `cascade`: swap application, gravity, refill, stabilization
//! - `play`: the board, undo, hints, notifications

pub mod core;
pub mod tokens;
pub mod grid;
pub mod matching;
pub mod scoring;
pub mod cascade;
pub mod play;

// Re-export commonly used types
pub use crate::core::{BoardConfig, BoardError, GameRng, GameRngState};

pub use crate::tokens::{Species, Stage, Token};

pub use crate::grid::{Grid, Position, Swap, CELL_COUNT, GRID_SIZE};

pub use crate::matching::{has_runs, scan_all, Axis, Run};

pub use crate::scoring::{Resolution, Resolver};

pub use crate::cascade::{
    BoardCells, CascadeEngine, CascadeReport, CascadeState, CascadeStep,
    RefillSource, ScriptedRefill,
};

pub use crate::play::{
    Board, PlayOutcome,
    BoardEvent, EventKind, ObserverId, ObserverRegistry,
    History, Snapshot,
};
