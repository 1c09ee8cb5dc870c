//! Low-level DSP primitives used by the slope bank.
//!
//! These components are allocation-free and realtime-safe. They hold no state
//! of their own (the bank's channels do), so every function here can be called
//! from the per-sample loop and tested in isolation.

/// Curve shaper: square, logarithmic, linear, exponential and sine blends.
pub mod curve;
/// Bipolar, unipolar and volt conversions.
pub mod cv;
/// TIME and INTONE to per-channel frequency.
pub mod frequency;
/// Vactrol-style low pass gate envelope follower.
pub mod lpg;
/// Six-into-one mix bus for both ranges.
pub mod mix;
/// Phase accumulation and the bipolar rise/fall slope.
pub mod slope;

pub use curve::shape;
pub use frequency::Range;
pub use slope::slope;
