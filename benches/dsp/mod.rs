//! Benchmarks for per-sample DSP primitives.

mod curve;
mod frequency;
mod mix;

pub use curve::bench_curve;
pub use frequency::bench_frequency;
pub use mix::bench_mix;
