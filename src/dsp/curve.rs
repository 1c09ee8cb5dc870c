//! Curve shaping of the bipolar slope.

/*
Curve Shaping
=============

Every channel produces a straight-line slope first (see `dsp/slope.rs`). The
CURVE control then bends that line into one of five families of shape before
the value leaves the module.

Vocabulary
----------

  linear      The raw slope value, -1.0 to +1.0. Straight rise, straight fall.

  curve       The selector, 0.0 to 1.0. Sweeps continuously through:

                0.00   square        sign(x)
                0.25   logarithmic   sign(x) * sqrt(|x|)
                0.50   linear        x
                0.75   exponential   sign(x) * x^2
                1.00   sine          sin(x * PI/2)

  crossfade   Between two neighbouring breakpoints the output is a linear
              blend of the two shapes (see `dsp/mix.rs` for the same math).


The Shapes
----------

    +1 ┤      ┌────        ╭────        ╱          ___╱       ╭──
       │      │           ╱            ╱          ╱          ╱
     0 ┤──────┼──        ┼──          ╱          ┼          ┼
       │      │         ╱            ╱          ╱          ╱
    -1 ┤──────┘      ───╯           ╱       ╱───        ──╯
        square      log         linear     exp         sine

Square and logarithmic sit "above" linear in the rising half: they get to the
top quickly. Exponential sits below: slow start, fast finish. Sine eases at
both ends, which is what makes a triangle slope sound like a sine wave in the
SOUND range.

All five shapes are odd functions and map -1 to -1 and +1 to +1. The rest
value of an envelope (-1) therefore survives shaping unchanged, whatever the
curve setting.


Cost
----

Only the two shapes adjacent to the current curve position are evaluated, so
the sine branch (the only transcendental one) runs only for curve > 0.75.
*/

use std::f32::consts::FRAC_PI_2;

/// Sign with `sign(0) == 0`, unlike `f32::signum`.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub fn logarithmic(x: f32) -> f32 {
    sign(x) * x.abs().sqrt()
}

#[inline]
pub fn exponential(x: f32) -> f32 {
    sign(x) * x * x
}

#[inline]
pub fn sine(x: f32) -> f32 {
    (x * FRAC_PI_2).sin()
}

#[inline]
fn crossfade(a: f32, b: f32, amount: f32) -> f32 {
    a + (b - a) * amount
}

/// Bend a linear slope value with the CURVE control.
///
/// `linear` is expected in [-1, 1] and `curve` in [0, 1]; both are clamped.
/// Breakpoints are exact: `shape(x, 0.0) == sign(x)`, `shape(x, 0.5) == x`
/// and `shape(x, 1.0) == sin(x * PI/2)`.
#[inline]
pub fn shape(linear: f32, curve: f32) -> f32 {
    let x = if linear.is_nan() { 0.0 } else { linear.clamp(-1.0, 1.0) };
    let c = if curve.is_nan() { 0.5 } else { curve.clamp(0.0, 1.0) };

    if c < 0.25 {
        crossfade(sign(x), logarithmic(x), c * 4.0)
    } else if c < 0.5 {
        crossfade(logarithmic(x), x, (c - 0.25) * 4.0)
    } else if c < 0.75 {
        crossfade(x, exponential(x), (c - 0.5) * 4.0)
    } else {
        crossfade(exponential(x), sine(x), (c - 0.75) * 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn grid() -> impl Iterator<Item = f32> {
        (0..=40).map(|i| -1.0 + i as f32 * 0.05)
    }

    #[test]
    fn curve_zero_is_square() {
        for x in grid() {
            assert!(
                (shape(x, 0.0) - sign(x)).abs() < EPSILON,
                "square breakpoint failed at {x}"
            );
        }
        assert_eq!(shape(0.0, 0.0), 0.0);
    }

    #[test]
    fn curve_half_is_identity() {
        for x in grid() {
            assert!((shape(x, 0.5) - x).abs() < EPSILON, "identity failed at {x}");
        }
    }

    #[test]
    fn curve_one_is_sine() {
        assert!((shape(1.0, 1.0) - 1.0).abs() < EPSILON);
        assert!((shape(-1.0, 1.0) + 1.0).abs() < EPSILON);
        assert!((shape(0.5, 1.0) - (0.5 * FRAC_PI_2).sin()).abs() < EPSILON);
    }

    #[test]
    fn rest_value_survives_every_curve() {
        for i in 0..=20 {
            let curve = i as f32 / 20.0;
            assert!((shape(-1.0, curve) + 1.0).abs() < EPSILON);
            assert!((shape(1.0, curve) - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn shaping_is_monotonic() {
        for i in 0..=20 {
            let curve = i as f32 / 20.0;
            let mut previous = shape(-1.0, curve);
            for x in grid().skip(1) {
                let y = shape(x, curve);
                assert!(y >= previous - EPSILON, "curve {curve} not monotonic at {x}");
                previous = y;
            }
        }
    }

    #[test]
    fn quarter_points_hit_helper_shapes() {
        assert!((shape(0.25, 0.25) - 0.5).abs() < EPSILON);
        assert!((shape(0.5, 0.75) - 0.25).abs() < EPSILON);
        assert!((shape(-0.5, 0.75) + 0.25).abs() < EPSILON);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(shape(3.0, 0.5), 1.0);
        assert_eq!(shape(-3.0, 0.5), -1.0);
        assert!((shape(0.3, 7.0) - shape(0.3, 1.0)).abs() < EPSILON);
    }
}
