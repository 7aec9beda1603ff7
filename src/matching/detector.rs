//! Run-length scanning.
//!
//! All detection is written once, for rows. Column runs come from scanning
//! the rows of a transposed grid and mapping the results back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::grid::{Grid, Position, GRID_SIZE};
use crate::tokens::Token;

/// Shortest sequence that counts as a run.
pub const MIN_RUN: usize = 3;

/// Orientation of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
}

/// A maximal sequence of at least [`MIN_RUN`] same-species tokens.
///
/// `line` is the row (for `Axis::Row`) or column (for `Axis::Column`);
/// `start` and `lead` are offsets along that line. The lead cell is where an
/// evolved token lands: the first cell for full scans, the moved cell for
/// localized scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub axis: Axis,
    pub line: usize,
    pub start: usize,
    pub len: usize,
    pub lead: usize,
}

impl Run {
    fn at(&self, offset: usize) -> Position {
        match self.axis {
            Axis::Row => Position { row: self.line, col: offset },
            Axis::Column => Position { row: offset, col: self.line },
        }
    }

    /// Cells of the run in scan order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let run = *self;
        (run.start..run.start + run.len).map(move |offset| run.at(offset))
    }

    #[must_use]
    pub fn lead_position(&self) -> Position {
        self.at(self.lead)
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Reinterpret a row run found on a transposed grid as a column run.
    fn into_column(self) -> Self {
        Self {
            axis: Axis::Column,
            ..self
        }
    }
}

fn same(a: Option<Token>, b: Option<Token>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.same_species(&b))
}

/// Every maximal run in one row as `(start_col, length)`.
///
/// Single left-to-right pass: a run is emitted when the species changes (or
/// the row ends) after at least [`MIN_RUN`] matching cells. Empty cells and
/// wildcards never extend a run.
#[must_use]
pub fn scan_row(grid: &Grid, row: usize) -> SmallVec<[(usize, usize); 2]> {
    let cells = grid.row(row);
    let mut runs = SmallVec::new();
    let mut start = 0;

    for col in 1..=GRID_SIZE {
        let continues = col < GRID_SIZE && same(cells[start], cells[col]);
        if !continues {
            let len = col - start;
            if len >= MIN_RUN {
                runs.push((start, len));
            }
            start = col;
        }
    }

    runs
}

/// Runs in every row, top to bottom.
#[must_use]
pub fn scan_rows(grid: &Grid) -> Vec<Run> {
    (0..GRID_SIZE)
        .flat_map(|row| {
            scan_row(grid, row).into_iter().map(move |(start, len)| Run {
                axis: Axis::Row,
                line: row,
                start,
                len,
                lead: start,
            })
        })
        .collect()
}

/// Runs in every column, left to right.
#[must_use]
pub fn scan_columns(grid: &Grid) -> Vec<Run> {
    scan_rows(&grid.transposed())
        .into_iter()
        .map(Run::into_column)
        .collect()
}

/// Row runs followed by column runs.
#[must_use]
pub fn scan_all(grid: &Grid) -> Vec<Run> {
    let mut runs = scan_rows(grid);
    runs.extend(scan_columns(grid));
    runs
}

/// True if any row or column holds a run.
#[must_use]
pub fn has_runs(grid: &Grid) -> bool {
    let transposed = grid.transposed();
    (0..GRID_SIZE).any(|line| !scan_row(grid, line).is_empty() || !scan_row(&transposed, line).is_empty())
}

/// The horizontal run through one cell, if any.
///
/// Extends left and right from the cell while the species matches, so only
/// the cell's own row is examined.
#[must_use]
pub fn scan_around(grid: &Grid, row: usize, col: usize) -> Option<Run> {
    let token = grid.get(row, col)?;
    let matches = |c: usize| same(Some(token), grid.get(row, c));

    let mut start = col;
    while start > 0 && matches(start - 1) {
        start -= 1;
    }
    let mut end = col + 1;
    while end < GRID_SIZE && matches(end) {
        end += 1;
    }

    let len = end - start;
    (len >= MIN_RUN).then_some(Run {
        axis: Axis::Row,
        line: row,
        start,
        len,
        lead: col,
    })
}

/// The vertical run through one cell, via [`scan_around`] on the transposed grid.
#[must_use]
pub fn scan_around_column(grid: &Grid, row: usize, col: usize) -> Option<Run> {
    scan_around(&grid.transposed(), col, row).map(Run::into_column)
}
