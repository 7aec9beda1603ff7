//! Cell coordinates and candidate swaps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::BoardError;

/// Side length of the square board.
pub const GRID_SIZE: usize = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A cell coordinate, row 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position, panicking when it lies off the board.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < GRID_SIZE && col < GRID_SIZE,
            "position ({}, {}) is outside the {}x{} grid",
            row,
            col,
            GRID_SIZE,
            GRID_SIZE
        );
        Self { row, col }
    }

    /// Create a position, reporting out-of-range coordinates as an error.
    pub fn try_new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Ok(Self { row, col })
        } else {
            Err(BoardError::OutOfBounds {
                row,
                col,
                size: GRID_SIZE,
            })
        }
    }

    /// Position for a row-major flat index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: index / GRID_SIZE,
            col: index % GRID_SIZE,
        }
    }

    /// Row-major flat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    /// The same cell seen on a transposed grid.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }

    /// Orthogonal adjacency: same row one column apart, or same column one row apart.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.row == other.row && self.col.abs_diff(other.col) == 1)
            || (self.col == other.col && self.row.abs_diff(other.row) == 1)
    }

    /// The cell to the right, if any.
    #[must_use]
    pub fn right(self) -> Option<Position> {
        (self.col + 1 < GRID_SIZE).then(|| Position { row: self.row, col: self.col + 1 })
    }

    /// The up-to-eight surrounding cells, clipped at the edges.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Position; 8]> {
        let mut out = SmallVec::new();
        let rows = self.row.saturating_sub(1)..=(self.row + 1).min(GRID_SIZE - 1);
        for row in rows {
            let cols = self.col.saturating_sub(1)..=(self.col + 1).min(GRID_SIZE - 1);
            for col in cols {
                if (row, col) != (self.row, self.col) {
                    out.push(Position { row, col });
                }
            }
        }
        out
    }

    /// Every cell of the row and column through this one, including itself once.
    #[must_use]
    pub fn cross(self) -> SmallVec<[Position; 16]> {
        let mut out: SmallVec<[Position; 16]> = (0..GRID_SIZE)
            .map(|col| Position { row: self.row, col })
            .collect();
        out.extend(
            (0..GRID_SIZE)
                .filter(|&row| row != self.row)
                .map(|row| Position { row, col: self.col }),
        );
        out
    }

    /// All board positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Two cells a player proposes to exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    pub first: Position,
    pub second: Position,
}

impl Swap {
    #[must_use]
    pub const fn new(first: Position, second: Position) -> Self {
        Self { first, second }
    }

    /// Whether the two cells are orthogonal neighbors.
    #[must_use]
    pub fn is_adjacent(self) -> bool {
        self.first.is_adjacent(self.second)
    }

    /// The same swap on a transposed grid.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            first: self.first.transposed(),
            second: self.second.transposed(),
        }
    }
}

impl std::fmt::Display for Swap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for index in 0..CELL_COUNT {
            assert_eq!(Position::from_index(index).index(), index);
        }
        assert_eq!(Position::new(2, 5).index(), 21);
    }

    #[test]
    fn test_try_new_bounds() {
        assert!(Position::try_new(7, 7).is_ok());
        assert_eq!(
            Position::try_new(8, 0),
            Err(BoardError::OutOfBounds { row: 8, col: 0, size: 8 })
        );
    }

    #[test]
    #[should_panic(expected = "outside the 8x8 grid")]
    fn test_new_panics_off_board() {
        let _ = Position::new(0, 8);
    }

    #[test]
    fn test_adjacency() {
        let p = Position::new(3, 3);
        assert!(p.is_adjacent(Position::new(3, 4)));
        assert!(p.is_adjacent(Position::new(2, 3)));
        assert!(!p.is_adjacent(Position::new(4, 4)));
        assert!(!p.is_adjacent(Position::new(3, 5)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn test_neighbors_clipped() {
        assert_eq!(Position::new(3, 3).neighbors().len(), 8);
        assert_eq!(Position::new(0, 0).neighbors().len(), 3);
        assert_eq!(Position::new(0, 4).neighbors().len(), 5);
        assert_eq!(Position::new(7, 7).neighbors().len(), 3);
        assert!(!Position::new(3, 3).neighbors().contains(&Position::new(3, 3)));
    }

    #[test]
    fn test_cross_covers_row_and_column_once() {
        let cross = Position::new(2, 6).cross();
        assert_eq!(cross.len(), 2 * GRID_SIZE - 1);
        assert_eq!(cross.iter().filter(|p| **p == Position::new(2, 6)).count(), 1);
        assert!(cross.iter().all(|p| p.row == 2 || p.col == 6));
    }

    #[test]
    fn test_edge_steps() {
        assert_eq!(Position::new(0, 7).right(), None);
        assert_eq!(Position::new(7, 6).right(), Some(Position::new(7, 7)));
        assert_eq!(Position::new(1, 1).right(), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_swap_transposed() {
        let swap = Swap::new(Position::new(1, 2), Position::new(1, 3));
        let t = swap.transposed();
        assert_eq!(t.first, Position::new(2, 1));
        assert_eq!(t.second, Position::new(3, 1));
        assert!(t.is_adjacent());
    }
}
