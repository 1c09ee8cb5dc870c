//! The MIX output: summing and analog-OR combination of the six channels.

/*
Mixing Six Slopes
=================

The bank has one extra output that combines all six channels. How it combines
them depends on the range, because audio and control voltages want different
things from a mixer.

SOUND: Sum and Soft Limit
-------------------------

Oscillators are mixed by ADDING them, the same way `sum_in_place` adds two
signals:

    mix = tanh( (ch0 + ch1 + ... + ch5) / 3 )

Six full-scale sines in phase sum to 6.0. Dividing by 3 keeps a single channel
comfortably linear (tanh(1/3) ≈ 0.32) while still letting a full stack drive
the limiter. tanh bounds the result to (-1, +1) without the harsh corners of a
hard clip:

      out
      +1 ┤           ___________
         │        ╱
       0 ┼──────╱──────── sum/3
         │    ╱
      -1 ┤───╯
           -3    0     3

SHAPE: Analog OR
----------------

Envelopes and LFOs are mixed with a diode "OR": the output is whichever input
is highest. Each channel is first scaled down by its position so IDENTITY
dominates and the higher channels only peek through when the lower ones are
at rest:

    volts_i   = (out_i + 1) * 4        0 V ..= 8 V
    weighted  = volts_i / (i + 1)
    mix       = max(weighted) / 4 - 1  back to -1 ..= +1

All channels at rest (-1, i.e. 0 V) gives a mix at rest (-1).
*/

use crate::dsp::cv::{bipolar_to_volts, volts_to_bipolar};
use crate::CHANNELS;

/// Divisor applied to the SOUND sum before limiting.
pub const SOUND_MIX_DIVISOR: f32 = 3.0;

/// Soft clipping with tanh.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    (sample * drive).tanh()
}

/// Sum the channel outputs and soft limit them.
#[inline]
pub fn sound_mix(outputs: &[f32; CHANNELS]) -> f32 {
    let sum: f32 = outputs.iter().sum();
    soft_clip(sum, 1.0 / SOUND_MIX_DIVISOR)
}

/// Diode-OR of the channel outputs, lower channels weighted higher.
#[inline]
pub fn shape_mix(outputs: &[f32; CHANNELS]) -> f32 {
    let peak = outputs
        .iter()
        .enumerate()
        .map(|(index, &out)| bipolar_to_volts(out.clamp(-1.0, 1.0)) / (index + 1) as f32)
        .fold(0.0_f32, f32::max);
    volts_to_bipolar(peak)
}

/// Mix a block of per-channel buffers into `out`.
pub fn mix_block(channels: [&[f32]; CHANNELS], out: &mut [f32], sound: bool) {
    for (i, o) in out.iter_mut().enumerate() {
        let mut frame = [0.0; CHANNELS];
        for (slot, channel) in frame.iter_mut().zip(channels.iter()) {
            *slot = channel.get(i).copied().unwrap_or(0.0);
        }
        *o = if sound {
            sound_mix(&frame)
        } else {
            shape_mix(&frame)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_mix_of_unison_is_tanh_of_double() {
        for &sample in &[-1.0_f32, -0.4, 0.0, 0.3, 1.0] {
            let frame = [sample; CHANNELS];
            let expected = (6.0 * sample / 3.0).tanh();
            assert!((sound_mix(&frame) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn sound_mix_is_bounded() {
        let frame = [1.0; CHANNELS];
        let mixed = sound_mix(&frame);
        assert!(mixed < 1.0 && mixed > 0.9);
    }

    #[test]
    fn shape_mix_at_rest_is_rest() {
        let frame = [-1.0; CHANNELS];
        assert!((shape_mix(&frame) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn shape_mix_identity_passes_unweighted() {
        let mut frame = [-1.0; CHANNELS];
        frame[0] = 0.5;
        assert!((shape_mix(&frame) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn shape_mix_weights_higher_channels_down() {
        let mut frame = [-1.0; CHANNELS];
        frame[3] = 1.0; // 8 V / 4 = 2 V
        assert!((shape_mix(&frame) - volts_to_bipolar(2.0)).abs() < 1e-6);
    }

    #[test]
    fn shape_mix_takes_the_maximum() {
        let mut frame = [-1.0; CHANNELS];
        frame[1] = 1.0; // 8 V / 2 = 4 V
        frame[2] = 1.0; // 8 V / 3 = 2.67 V
        assert!((shape_mix(&frame) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn mix_block_uses_range() {
        let a = [1.0, 0.0];
        let rest = [-1.0, -1.0];
        let mut out = [0.0; 2];

        mix_block([&a, &rest, &rest, &rest, &rest, &rest], &mut out, false);
        assert!((out[0] - 1.0).abs() < 1e-6);
        assert!((out[1] - 0.0).abs() < 1e-6);

        mix_block([&a, &rest, &rest, &rest, &rest, &rest], &mut out, true);
        assert!((out[0] - (-4.0_f32 / 3.0).tanh()).abs() < 1e-6);
    }
}
