//! Cascades: swap application, gravity, refill and the stabilization loop.

pub mod engine;
pub mod refill;

pub use engine::{
    apply_gravity, apply_swap, clear_runs, refill_empty, BoardCells, CascadeEngine, CascadeReport,
    CascadeState, CascadeStep,
};
pub use refill::{RefillSource, ScriptedRefill};
