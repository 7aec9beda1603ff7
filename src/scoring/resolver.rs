//! Clear resolution: turning runs and wildcard swaps into points and empties.
//!
//! The resolver reads tokens from the *current* grid and writes results into
//! the *candidate* grid. Clearing an evolved token queues more cells, and
//! those are drained from a FIFO worklist rather than by recursion, so a chain
//! reaction of any length runs in constant stack space and in a fixed order.
//!
//! Each cell is cleared (and scored) at most once per resolver. One resolver
//! covers one resolution round, so a cell sitting in both a row run and a
//! column run is paid for once.

use std::collections::VecDeque;

use tracing::trace;

use crate::grid::{Grid, Position, Swap, CELL_COUNT};
use crate::matching::Run;
use crate::tokens::{Species, Token};

use super::points::{
    BASE_CLEAR, EVOLVE_FIRST_BONUS, EVOLVE_SECOND_BONUS, EVOLVE_WILDCARD_BONUS,
    FIRST_EVOLUTION_CLEAR, SECOND_EVOLUTION_CLEAR, WILDCARD_FACTOR,
};

/// Token and bonus awarded to the lead cell of a run of `len`.
///
/// Only lengths 4, 5 and 6 evolve; 3 and anything above 6 just clear.
#[must_use]
pub fn run_evolution(species: Species, len: usize) -> Option<(Token, i64)> {
    let basic = Token::basic(species);
    match len {
        4 => Some((basic.first_evolved(), EVOLVE_FIRST_BONUS)),
        5 => Some((Token::wildcard(), EVOLVE_WILDCARD_BONUS)),
        6 => Some((basic.second_evolved(), EVOLVE_SECOND_BONUS)),
        _ => None,
    }
}

/// Summary of one resolver's work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Points earned.
    pub score: i64,
    /// Cells emptied (evolved lead cells included).
    pub cleared: usize,
    /// Tokens evolved by run length.
    pub evolved: usize,
}

/// Applies clears for one resolution round.
///
/// ## Example
///
/// ```
/// use rust_match3::grid::{Grid, Position};
/// use rust_match3::scoring::Resolver;
/// use rust_match3::tokens::{Species, Token};
///
/// let grid = Grid::filled_with(|| Token::Basic(Species::Pichu));
/// let mut candidate = grid.clone();
///
/// let mut resolver = Resolver::new(&grid, &mut candidate);
/// resolver.clear(Position::new(2, 2));
/// let resolution = resolver.finish();
///
/// assert_eq!(resolution.score, 10);
/// assert_eq!(candidate.get(2, 2), None);
/// ```
pub struct Resolver<'a> {
    grid: &'a Grid,
    candidate: &'a mut Grid,
    cleared: [bool; CELL_COUNT],
    queue: VecDeque<Position>,
    resolution: Resolution,
}

impl<'a> Resolver<'a> {
    /// Resolve against `grid`, writing into `candidate`.
    pub fn new(grid: &'a Grid, candidate: &'a mut Grid) -> Self {
        Self {
            grid,
            candidate,
            cleared: [false; CELL_COUNT],
            queue: VecDeque::new(),
            resolution: Resolution::default(),
        }
    }

    /// Points accumulated so far.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.resolution.score
    }

    /// Whether a cell has been cleared by this resolver.
    #[must_use]
    pub fn is_cleared(&self, pos: Position) -> bool {
        self.cleared[pos.index()]
    }

    /// Clear one cell and everything its tier effect reaches.
    ///
    /// Returns `false` when the cell was already cleared this round.
    pub fn clear(&mut self, pos: Position) -> bool {
        if self.is_cleared(pos) {
            return false;
        }

        self.queue.push_back(pos);
        while let Some(next) = self.queue.pop_front() {
            self.clear_one(next);
        }
        true
    }

    fn clear_one(&mut self, pos: Position) {
        if self.cleared[pos.index()] {
            return;
        }
        self.cleared[pos.index()] = true;
        self.candidate.set_at(pos, None);
        self.resolution.cleared += 1;
        self.resolution.score += BASE_CLEAR;

        match self.grid.get_at(pos) {
            Some(Token::FirstEvolution(_)) => {
                self.resolution.score += FIRST_EVOLUTION_CLEAR;
                self.queue.extend(pos.neighbors());
            }
            Some(Token::SecondEvolution(_)) => {
                self.resolution.score += SECOND_EVOLUTION_CLEAR;
                self.queue.extend(pos.cross());
            }
            _ => {}
        }
    }

    /// Clear a run and apply its run-length evolution.
    ///
    /// The evolution bonus is taken before the cells are cleared; the evolved
    /// token is written to the lead cell afterwards, so it survives its own
    /// run and any later clear in the same round.
    pub fn resolve_run(&mut self, run: &Run) {
        let lead = run.lead_position();
        let evolution = self
            .grid
            .get_at(lead)
            .and_then(Token::species)
            .and_then(|species| run_evolution(species, run.len));

        if let Some((_, bonus)) = evolution {
            self.resolution.score += bonus;
            self.resolution.evolved += 1;
        }

        for pos in run.positions() {
            self.clear(pos);
        }

        if let Some((token, _)) = evolution {
            self.candidate.set_at(lead, Some(token));
        }

        trace!(?run, score = self.resolution.score, "resolved run");
    }

    /// Apply the wildcard rule to a swap that has already been made on `grid`.
    ///
    /// If either swapped cell now holds the wildcard, every token sharing
    /// species with the other swapped token is cleared, then the wildcard
    /// cell is emptied unscored; the bonus is `WILDCARD_FACTOR * k²` for `k`
    /// species matches.
    /// Returns `false` when no wildcard is involved.
    pub fn resolve_wildcard_swap(&mut self, swap: Swap) -> bool {
        let (Some(a), Some(b)) = (self.grid.get_at(swap.first), self.grid.get_at(swap.second)) else {
            return false;
        };
        let (wildcard, target) = if a.is_wildcard() {
            (swap.first, b)
        } else if b.is_wildcard() {
            (swap.second, a)
        } else {
            return false;
        };

        let matching: Vec<Position> = self
            .grid
            .tokens()
            .filter(|(_, token)| token.same_species(&target))
            .map(|(pos, _)| pos)
            .collect();

        for &pos in &matching {
            self.clear(pos);
        }
        // The wildcard cell is emptied without a base clear.
        if !self.is_cleared(wildcard) {
            self.cleared[wildcard.index()] = true;
            self.candidate.set_at(wildcard, None);
            self.resolution.cleared += 1;
        }

        let k = matching.len() as i64;
        self.resolution.score += WILDCARD_FACTOR * k * k;

        trace!(%swap, matched = k, score = self.resolution.score, "wildcard swap");
        true
    }

    /// Finish and report.
    #[must_use]
    pub fn finish(self) -> Resolution {
        self.resolution
    }
}
