//! Point values.

/// Every cleared cell.
pub const BASE_CLEAR: i64 = 10;

/// Extra for clearing a first evolution (which also clears its neighbors).
pub const FIRST_EVOLUTION_CLEAR: i64 = 30;

/// Extra for clearing a second evolution (which also clears its row and column).
pub const SECOND_EVOLUTION_CLEAR: i64 = 60;

/// Run of four: lead cell becomes a first evolution.
pub const EVOLVE_FIRST_BONUS: i64 = 100;

/// Run of five: lead cell becomes the wildcard.
pub const EVOLVE_WILDCARD_BONUS: i64 = 300;

/// Run of six: lead cell becomes a second evolution.
pub const EVOLVE_SECOND_BONUS: i64 = 600;

/// Wildcard swap bonus is `WILDCARD_FACTOR * cleared²`.
pub const WILDCARD_FACTOR: i64 = 10;

/// Cost of asking for a hint.
pub const HINT_PENALTY: i64 = 50;
