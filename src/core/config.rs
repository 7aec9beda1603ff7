//! Board configuration.
//!
//! Boards are configured at construction time via `BoardConfig`.
//! The grid side is a compile-time constant (`GRID_SIZE`); everything
//! else that varies between sessions lives here.

use serde::{Deserialize, Serialize};

use crate::scoring::points::HINT_PENALTY;

/// Default upper bound on resolution rounds for a single cascade.
///
/// Random refills make an endless cascade astronomically unlikely; the
/// bound only matters for scripted refill sources.
pub const DEFAULT_MAX_CASCADE_ROUNDS: usize = 1_000;

/// Complete board configuration.
///
/// ## Example
///
/// ```
/// use rust_match3::core::BoardConfig;
///
/// let config = BoardConfig::new(7)
///     .with_hint_penalty(25)
///     .with_max_cascade_rounds(64);
///
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.hint_penalty, 25);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Seed for the board's refill generator.
    pub seed: u64,

    /// Points charged when a hint is requested and a move exists.
    pub hint_penalty: i64,

    /// Rounds after which a cascade is abandoned.
    pub max_cascade_rounds: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            hint_penalty: HINT_PENALTY,
            max_cascade_rounds: DEFAULT_MAX_CASCADE_ROUNDS,
        }
    }
}

impl BoardConfig {
    /// Create a configuration with the given seed and default rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the hint penalty.
    #[must_use]
    pub fn with_hint_penalty(mut self, penalty: i64) -> Self {
        assert!(penalty >= 0, "Hint penalty must not be negative");
        self.hint_penalty = penalty;
        self
    }

    /// Set the cascade round bound.
    #[must_use]
    pub fn with_max_cascade_rounds(mut self, rounds: usize) -> Self {
        assert!(rounds > 0, "Cascade must be allowed at least one round");
        self.max_cascade_rounds = rounds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.hint_penalty, 50);
        assert_eq!(config.max_cascade_rounds, DEFAULT_MAX_CASCADE_ROUNDS);
    }

    #[test]
    fn test_config_builder() {
        let config = BoardConfig::new(3)
            .with_hint_penalty(0)
            .with_max_cascade_rounds(5);

        assert_eq!(config.seed, 3);
        assert_eq!(config.hint_penalty, 0);
        assert_eq!(config.max_cascade_rounds, 5);
    }

    #[test]
    #[should_panic(expected = "at least one round")]
    fn test_zero_cascade_rounds() {
        let _ = BoardConfig::new(0).with_max_cascade_rounds(0);
    }

    #[test]
    fn test_config_serde() {
        let config = BoardConfig::new(11).with_hint_penalty(10);
        let json = serde_json::to_string(&config).unwrap();
        let back: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
