//! Control-voltage conversions.

/*
Signal Levels
=============

Inside the bank every slope is bipolar, -1.0 to +1.0. The hardware it models
speaks volts, and the mix bus and the CV inputs need to translate:

  bipolar     -1.0 ..= +1.0   slope and oscillator output
  unipolar     0.0 ..= 1.0    envelope amounts, LPG level, gate velocity
  volts        0 V ..= 8 V    SHAPE range outputs (an envelope at rest is 0 V)
  cv stream   -1.0 ..= +1.0   normalised input stream, full scale = 5 V

    bipolar   unipolar   output volts
    -1.0      0.0        0 V
     0.0      0.5        4 V
    +1.0      1.0        8 V
*/

/// Volts represented by a full-scale (1.0) CV input stream.
pub const CV_VOLTS: f32 = 5.0;

/// Peak output voltage of a SHAPE range slope.
pub const OUTPUT_VOLTS: f32 = 8.0;

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Convert unipolar signal (0.0 to 1.0) to bipolar (-1.0 to +1.0).
#[inline]
pub fn unipolar_to_bipolar(unipolar: f32) -> f32 {
    (unipolar * 2.0) - 1.0
}

/// Bipolar slope to output volts (0 V at rest, 8 V at peak).
#[inline]
pub fn bipolar_to_volts(bipolar: f32) -> f32 {
    bipolar_to_unipolar(bipolar) * OUTPUT_VOLTS
}

/// Output volts back to the bipolar range.
#[inline]
pub fn volts_to_bipolar(volts: f32) -> f32 {
    unipolar_to_bipolar(volts / OUTPUT_VOLTS)
}

/// Replace a non-finite sample with `fallback`.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_line_up_with_the_table() {
        let table = [(-1.0_f32, 0.0_f32, 0.0_f32), (0.0, 0.5, 4.0), (1.0, 1.0, 8.0)];
        for &(bipolar, unipolar, volts) in &table {
            assert!((bipolar_to_unipolar(bipolar) - unipolar).abs() < 1e-6);
            assert!((unipolar_to_bipolar(unipolar) - bipolar).abs() < 1e-6);
            assert!((bipolar_to_volts(bipolar) - volts).abs() < 1e-6);
        }
    }

    #[test]
    fn volts_round_trip() {
        for volts in [0.0_f32, 1.0, 2.5, 8.0] {
            assert!((bipolar_to_volts(volts_to_bipolar(volts)) - volts).abs() < 1e-5);
        }
    }

    #[test]
    fn test_finite_or() {
        assert_eq!(finite_or(0.25, 1.0), 0.25);
        assert_eq!(finite_or(f32::NAN, 1.0), 1.0);
        assert_eq!(finite_or(f32::NEG_INFINITY, -1.0), -1.0);
    }
}
