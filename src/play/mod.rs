//! Playing a board.
//!
//! - `controller`: the [`Board`] and its play/undo/hint operations
//! - `history`: stabilized grids kept for undo
//! - `events`: notifications and the observer registry
//! - `deadlock`: search for a legal move

pub mod controller;
pub mod deadlock;
pub mod events;
pub mod history;

pub use controller::{Board, PlayOutcome};
pub use deadlock::find_move;
pub use events::{BoardEvent, EventKind, Observer, ObserverId, ObserverRegistry};
pub use history::{History, Snapshot};
