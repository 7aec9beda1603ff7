//! Core engine types: RNG, configuration, errors.
//!
//! These are the ambient pieces every other module leans on. Nothing here
//! knows about tokens beyond drawing fresh basic ones.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{BoardConfig, DEFAULT_MAX_CASCADE_ROUNDS};
pub use error::BoardError;
pub use rng::{GameRng, GameRngState};
