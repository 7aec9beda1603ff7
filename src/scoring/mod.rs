//! Scoring and evolution.
//!
//! - `points`: every point value the rules award or charge
//! - `resolver`: per-round clear resolution with tier chain reactions,
//!   run-length evolution and the wildcard swap rule

pub mod points;
pub mod resolver;

pub use resolver::{run_evolution, Resolution, Resolver};
