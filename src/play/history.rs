//! Grid history for undo.
//!
//! Every committed play appends the stabilized grid together with the score
//! that play earned. Entries share structure through `im::Vector`, so keeping
//! the full history of a session stays cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// A stabilized grid and the score of the play that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: i64,
}

/// Append-only list of snapshots, newest last. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vector<Snapshot>,
}

impl History {
    /// Start from the board's initial grid.
    pub fn new(initial: Grid) -> Self {
        let mut snapshots = Vector::new();
        snapshots.push_back(Snapshot { grid: initial, score: 0 });
        Self { snapshots }
    }

    pub fn push(&mut self, grid: Grid, score: i64) {
        self.snapshots.push_back(Snapshot { grid, score });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; the initial grid is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshot before the latest one.
    #[must_use]
    pub fn next_to_last(&self) -> Option<&Snapshot> {
        let len = self.snapshots.len();
        if len < 2 {
            return None;
        }
        self.snapshots.get(len - 2)
    }

    /// Drop the latest snapshot, keeping at least the initial one.
    pub fn pop(&mut self) -> Option<Snapshot> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop_back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}
