//! Deadlock detection.
//!
//! Tries every swap of a cell with its right neighbor, then the same pair on
//! the transposed grid (a vertical swap in board coordinates), one cell at a
//! time. The first swap that would trigger anything is returned.

use crate::cascade::{apply_swap, BoardCells};
use crate::grid::{Grid, Swap};

/// First swap that would trigger a clear, or `None` if the board is stuck.
///
/// Works on scratch copies; `grid` is not touched.
#[must_use]
pub fn find_move(grid: &Grid) -> Option<Swap> {
    let mut scratch = BoardCells::new(grid.clone());
    let mut transposed = BoardCells::new(grid.transposed());

    for pos in grid.positions() {
        let Some(next) = pos.right() else {
            continue;
        };
        let swap = Swap::new(pos, next);
        if triggers(&mut scratch, swap) {
            return Some(swap);
        }
        if triggers(&mut transposed, swap) {
            return Some(swap.transposed());
        }
    }
    None
}

fn triggers(cells: &mut BoardCells, swap: Swap) -> bool {
    let triggered = apply_swap(cells, swap).is_some();
    if triggered {
        cells.reset_candidate();
    }
    triggered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::tokens::{Species, Token};

    const QUIET: &str = "
        B C K Y P S T B
        Y P S T B C K Y
        T B C K Y P S T
        K Y P S T B C K
        S T B C K Y P S
        C K Y P S T B C
        P S T B C K Y P
        B C K Y P S T B
    ";

    fn quiet() -> Grid {
        QUIET.parse().unwrap()
    }

    #[test]
    fn test_deadlocked_board() {
        assert_eq!(find_move(&quiet()), None);
    }

    fn swap(a: (usize, usize), b: (usize, usize)) -> Swap {
        Swap::new(Position::new(a.0, a.1), Position::new(b.0, b.1))
    }

    #[test]
    fn test_horizontal_move() {
        let mut g = quiet();
        let t = Some(Token::Basic(Species::Totodile));
        g.set(1, 0, t);
        g.set(2, 0, t);
        g.set(3, 1, t);

        // (2, 0) moving right lines up with (3, 1) and (4, 1).
        assert_eq!(find_move(&g), Some(swap((2, 0), (2, 1))));
        assert_eq!(g.get(2, 0), t);
    }

    #[test]
    fn test_vertical_move_is_mapped_back() {
        let mut g = quiet();
        let k = Some(Token::Basic(Species::Chikorita));
        g.set(6, 0, k);
        g.set(6, 1, k);
        g.set(5, 2, k);

        // (6, 0) moving up joins (5, 1) and (5, 2).
        let found = find_move(&g).unwrap();
        assert_eq!(found, swap((5, 0), (6, 0)));

        let mut cells = BoardCells::new(g.clone());
        assert!(apply_swap(&mut cells, found).is_some());
        assert_eq!(cells.grid, g);
    }

    #[test]
    fn test_wildcard_always_has_a_move() {
        let mut g = quiet();
        g.set(4, 4, Some(Token::Wildcard));
        assert_eq!(find_move(&g), Some(swap((4, 3), (4, 4))));
    }

    #[test]
    fn test_grid_is_untouched() {
        let mut g = quiet();
        g.set(0, 0, Some(Token::Wildcard));
        let before = g.clone();
        let _ = find_move(&g);
        assert_eq!(g, before);
    }
}
