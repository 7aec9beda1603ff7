//! The board grid: a flat, row-major buffer of optional tokens.
//!
//! `Grid` is a plain value. The board keeps two of them (the visible grid and
//! the candidate grid), so copies are always explicit through `clone`, and a
//! mutation of one can never leak into the other.
//!
//! Column logic reuses row logic by transposing; the flat buffer makes
//! in-place transposition a sequence of swaps with no reallocation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{BoardError, GameRng};
use crate::tokens::{Species, Token};

use super::position::{Position, CELL_COUNT, GRID_SIZE};

/// A `GRID_SIZE` × `GRID_SIZE` matrix of optional tokens.
///
/// Empty cells only exist transiently while a cascade is resolving.
///
/// ## Example
///
/// ```
/// use rust_match3::grid::Grid;
/// use rust_match3::tokens::{Species, Token};
///
/// let mut grid = Grid::empty();
/// grid.set(0, 1, Some(Token::Basic(Species::Pichu)));
///
/// let mut flipped = grid.clone();
/// flipped.transpose();
/// assert_eq!(flipped.get(1, 0), Some(Token::Basic(Species::Pichu)));
/// assert_ne!(grid, flipped);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Option<Token>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// A grid with every cell empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
        }
    }

    /// A grid filled from a token source, in row-major order.
    pub fn filled_with(mut next: impl FnMut() -> Token) -> Self {
        Self {
            cells: (0..CELL_COUNT).map(|_| Some(next())).collect(),
        }
    }

    /// A grid of uniformly random basic tokens. May contain runs.
    pub fn random(rng: &mut GameRng) -> Self {
        Self::filled_with(|| Token::random_basic(rng))
    }

    /// Build a grid from row-major rows.
    pub fn from_rows(rows: &[Vec<Option<Token>>]) -> Result<Self, BoardError> {
        if rows.len() != GRID_SIZE {
            return Err(BoardError::RowCount {
                expected: GRID_SIZE,
                found: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for (row, cols) in rows.iter().enumerate() {
            if cols.len() != GRID_SIZE {
                return Err(BoardError::ColumnCount {
                    row,
                    expected: GRID_SIZE,
                    found: cols.len(),
                });
            }
            cells.extend_from_slice(cols);
        }
        Ok(Self { cells })
    }

    fn offset(row: usize, col: usize) -> usize {
        assert!(
            row < GRID_SIZE && col < GRID_SIZE,
            "cell ({}, {}) is outside the {}x{} grid",
            row,
            col,
            GRID_SIZE,
            GRID_SIZE
        );
        row * GRID_SIZE + col
    }

    /// The token at a cell. Panics off the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        self.cells[Self::offset(row, col)]
    }

    /// Replace the token at a cell. Panics off the board.
    pub fn set(&mut self, row: usize, col: usize, token: Option<Token>) {
        self.cells[Self::offset(row, col)] = token;
    }

    #[must_use]
    pub fn get_at(&self, pos: Position) -> Option<Token> {
        self.get(pos.row, pos.col)
    }

    pub fn set_at(&mut self, pos: Position, token: Option<Token>) {
        self.set(pos.row, pos.col, token);
    }

    /// Exchange the contents of two cells.
    pub fn swap(&mut self, a: Position, b: Position) {
        self.cells.swap(Self::offset(a.row, a.col), Self::offset(b.row, b.col));
    }

    /// Swap rows and columns in place.
    pub fn transpose(&mut self) {
        for row in 0..GRID_SIZE {
            for col in row + 1..GRID_SIZE {
                self.cells.swap(row * GRID_SIZE + col, col * GRID_SIZE + row);
            }
        }
    }

    /// A transposed copy.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut copy = self.clone();
        copy.transpose();
        copy
    }

    /// One row as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Option<Token>] {
        let start = Self::offset(row, 0);
        &self.cells[start..start + GRID_SIZE]
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of tokens of a species, any stage.
    #[must_use]
    pub fn species_count(&self, species: Species) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|t| t.species() == Some(species))
            .count()
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        Position::all()
    }

    /// Occupied cells with their tokens, row-major.
    pub fn tokens(&self) -> impl Iterator<Item = (Position, Token)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|t| (Position::from_index(i), t)))
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..GRID_SIZE {
            let line: Vec<String> = self
                .row(row)
                .iter()
                .map(|cell| cell.map_or_else(|| ".".to_string(), |t| t.to_string()))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}

/// Parses the text form: `GRID_SIZE` non-blank lines of whitespace-separated
/// token codes, `.` for an empty cell.
impl FromStr for Grid {
    type Err = BoardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|code| match code {
                        "." => Ok(None),
                        _ => code.parse::<Token>().map(Some),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows)
    }
}
