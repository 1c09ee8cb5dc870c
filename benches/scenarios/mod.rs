//! Whole-bank benchmarks.
//!
//! These render complete blocks through `SlopeBank::process`, the way a host
//! callback would.

mod cells;
mod modulated;

pub use cells::bench_cells;
pub use modulated::bench_modulated;
