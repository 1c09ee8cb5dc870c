//! Vactrol-style one-pole envelope follower.

/*
Low Pass Gate Envelope
======================

A vactrol is an LED shining on a light-dependent resistor. When the LED turns
on the resistance drops quickly; when it turns off the resistance recovers
slowly. Used as a VCA that gives the soft, "plucked" decay of a low pass gate.

We model only the amplitude part with a one-pole follower:

    level += (target - level) * coefficient
    coefficient = 1 - exp(-1 / (tau * sample_rate))

`tau` is the time constant: after tau seconds the level has covered ~63% of the
distance to the target. Attack and decay get separate constants; decay is much
slower, as in the real cell.

      level
     1.0 ┤   ╭───────╮
         │  ╱         ╲
         │ ╱           ╲__
     0.0 ┼╯               ‾‾‾────
          gate on    gate off
*/

pub const ATTACK_TAU: f32 = 0.004;
pub const DECAY_TAU: f32 = 0.120;

/// Shortest usable time constant.
const MIN_TAU: f32 = 1.0e-5;

/// Per-sample smoothing coefficient for a time constant in seconds.
#[inline]
pub fn coefficient(tau: f32, sample_rate: f32) -> f32 {
    let samples = (tau.max(MIN_TAU) * sample_rate).max(1.0);
    1.0 - (-1.0 / samples).exp()
}

/// Advance one sample toward `target`, charging with `attack` and discharging
/// with `decay` coefficients. Returns the new level, clamped to [0, 1].
#[inline]
pub fn follow(level: f32, target: f32, attack: f32, decay: f32) -> f32 {
    let coefficient = if target > level { attack } else { decay };
    (level + (target - level) * coefficient).clamp(0.0, 1.0)
}
