//! Match detection.
//!
//! Full-board scans (`scan_rows`, `scan_columns`, `scan_all`) drive cascade
//! rounds; localized scans (`scan_around`, `scan_around_column`) check only
//! the two cells a swap moved.

pub mod detector;

pub use detector::{
    has_runs, scan_all, scan_around, scan_around_column, scan_columns, scan_row, scan_rows, Axis,
    Run, MIN_RUN,
};
