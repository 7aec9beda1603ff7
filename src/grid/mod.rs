//! Board geometry: positions, swaps, and the grid container.

pub mod matrix;
pub mod position;

pub use matrix::Grid;
pub use position::{Position, Swap, CELL_COUNT, GRID_SIZE};
