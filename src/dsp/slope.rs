//! Phase accumulation and the bipolar rise/fall slope.

/*
The Slope
=========

Every output in the bank starts life as a phase ramp turned into a slope:

  phase       Position in the current cycle, always in [0, 1).

  rise        Fraction of the cycle spent rising (the RAMP control). Clamped to
              [0.001, 0.999] so neither segment ever has zero length.

  slope       Bipolar triangle derived from phase:

      +1 ┤        ╱╲
         │      ╱    ╲
         │    ╱        ╲
      -1 ┤──╱────────────╲──
            0   rise       1    phase

              phase < rise:  -1 + 2 * phase / rise
              phase >= rise: +1 - 2 * (phase - rise) / (1 - rise)

  RAMP = 0.5 gives a symmetric triangle, RAMP near 0 a falling saw, RAMP near
  1 a rising saw.


Phase Increment
---------------

    increment = frequency / sample_rate

The frequency is floored at `MIN_FREQUENCY` so a slope never freezes and never
divides by zero, and the increment is kept below one full cycle per sample.
*/

use crate::MIN_FREQUENCY;

pub const MIN_RISE: f32 = 0.001;
pub const MAX_RISE: f32 = 0.999;

/// Largest phase step per sample. Anything above is aliasing anyway.
const MAX_INCREMENT: f32 = 0.5;

/// Clamp the RAMP control into a usable rise fraction.
#[inline]
pub fn rise_fraction(ramp: f32) -> f32 {
    if ramp.is_nan() {
        return 0.5;
    }
    ramp.clamp(MIN_RISE, MAX_RISE)
}

/// Bipolar slope value for `phase` with the given rise fraction.
#[inline]
pub fn slope(phase: f32, rise: f32) -> f32 {
    let rise = rise_fraction(rise);
    let value = if phase < rise {
        -1.0 + 2.0 * phase / rise
    } else {
        1.0 - 2.0 * (phase - rise) / (1.0 - rise)
    };
    value.clamp(-1.0, 1.0)
}

/// Phase on the rising segment that produces `level`.
#[inline]
pub fn rising_phase_for(level: f32, rise: f32) -> f32 {
    let rise = rise_fraction(rise);
    (level.clamp(-1.0, 1.0) + 1.0) * 0.5 * rise
}

/// Phase on the falling segment that produces `level`.
#[inline]
pub fn falling_phase_for(level: f32, rise: f32) -> f32 {
    let rise = rise_fraction(rise);
    wrap_phase(rise + (1.0 - level.clamp(-1.0, 1.0)) * 0.5 * (1.0 - rise))
}

/// Fold any value back into [0, 1). Non-finite input restarts the cycle.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    if !phase.is_finite() {
        return 0.0;
    }
    let wrapped = phase - phase.floor();
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Per-sample phase increment for `frequency` Hz.
#[inline]
pub fn phase_increment(frequency: f32, inv_sample_rate: f32) -> f32 {
    let frequency = if frequency.is_finite() {
        frequency.max(MIN_FREQUENCY)
    } else {
        MIN_FREQUENCY
    };
    (frequency * inv_sample_rate).min(MAX_INCREMENT)
}
