//! TIME / INTONE to per-channel frequency.

/*
Frequency Mapping
=================

TIME sets the speed of IDENTITY (channel 0). INTONE spreads the other five
channels away from it.

TIME
----

The knob position is turned into a control voltage, CV is added, and the
result is exponentiated around a range-specific base frequency:

    volts     = -2 V + time * 7 V + time_cv        (clamped to -2 V ..= +5 V)
    frequency = base * 2^volts

    SHAPE:  base 0.5 Hz      ->  0.125 Hz ..= 16 Hz
    SOUND:  base 261.63 Hz   ->  65.4 Hz  ..= 8372 Hz

One volt per octave, as on the hardware.

INTONE
------

Channels are numbered from 0 but harmonics from 1: IDENTITY (channel 0) is
harmonic 1, so channel n is harmonic n + 1. INTONE first gets a
gentle compression around noon, which widens the "nearly unison" region:

    shaped = 0.5 + (intone - 0.5) * (1 - 0.3 * |intone - 0.5|)

The deviation is then normalised back to [-1, 1] (full CW = +1) and:

    deviation >= 0:   ratio = 1 + deviation * (h - 1)          (toward h)
    deviation <  0:   ratio = 1 + |deviation| * (1/h - 1)      (toward 1/h)

       ratio
     6 ┤                          ╱  ch5
       │                       ╱╱   ch4
       │                    ╱╱╱    ...
     1 ┼━━━━━━━━━━━━━━━━━━━━━━━━━━━ unison at noon
  1/6  ┤╲╲╲
       └──────────────────────────→ intone
        0           0.5          1
*/

use crate::dsp::cv::CV_VOLTS;
use crate::MIN_FREQUENCY;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const TIME_VOLTS_MIN: f32 = -2.0;
pub const TIME_VOLTS_MAX: f32 = 5.0;

pub const SHAPE_BASE_HZ: f32 = 0.5;
pub const SOUND_BASE_HZ: f32 = 261.63;

/// Compression applied to INTONE around its centre.
const INTONE_COMPRESSION: f32 = 0.3;
/// `shaped - 0.5` when INTONE is at either extreme.
const INTONE_MAX_DEVIATION: f32 = 0.5 * (1.0 - INTONE_COMPRESSION * 0.5);

/// Frequency domain of the whole bank.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Range {
    /// Control rate: envelopes and LFOs.
    #[default]
    Shape,
    /// Audio rate: oscillators.
    Sound,
}

impl Range {
    pub fn base_frequency(self) -> f32 {
        match self {
            Range::Shape => SHAPE_BASE_HZ,
            Range::Sound => SOUND_BASE_HZ,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Range::Shape => 0,
            Range::Sound => 1,
        }
    }

    /// Decode the numeric host parameter (0 = SHAPE, 1 = SOUND).
    pub fn from_value(value: f32) -> Self {
        if value >= 0.5 {
            Range::Sound
        } else {
            Range::Shape
        }
    }
}

/// TIME knob plus CV (in volts), clamped to the TIME span.
#[inline]
pub fn time_volts(time: f32, time_cv_volts: f32) -> f32 {
    let time = if time.is_nan() { 0.5 } else { time.clamp(0.0, 1.0) };
    let cv = if time_cv_volts.is_finite() { time_cv_volts } else { 0.0 };
    (TIME_VOLTS_MIN + time * (TIME_VOLTS_MAX - TIME_VOLTS_MIN) + cv)
        .clamp(TIME_VOLTS_MIN, TIME_VOLTS_MAX)
}

/// TIME knob position that yields `volts` with no CV applied.
pub fn time_for_volts(volts: f32) -> f32 {
    ((volts - TIME_VOLTS_MIN) / (TIME_VOLTS_MAX - TIME_VOLTS_MIN)).clamp(0.0, 1.0)
}

/// TIME knob position that runs IDENTITY at `frequency` Hz in `range`.
pub fn time_for_frequency(frequency: f32, range: Range) -> f32 {
    time_for_volts((frequency.max(MIN_FREQUENCY) / range.base_frequency()).log2())
}

/// IDENTITY frequency in Hz.
#[inline]
pub fn identity_frequency(time: f32, time_cv: f32, range: Range) -> f32 {
    let volts = time_volts(time, time_cv * CV_VOLTS);
    (range.base_frequency() * volts.exp2()).max(MIN_FREQUENCY)
}

/// INTONE (plus its CV) folded into a signed spread amount in [-1, 1].
///
/// Positive values stack harmonics, negative values subharmonics.
#[inline]
pub fn intone_spread(intone: f32, intone_cv: f32) -> f32 {
    let intone = if intone.is_nan() { 0.5 } else { intone };
    let cv = if intone_cv.is_finite() { intone_cv } else { 0.0 };
    let centred = ((intone + cv * 0.5).clamp(0.0, 1.0)) - 0.5;
    let shaped = centred * (1.0 - INTONE_COMPRESSION * centred.abs());
    (shaped / INTONE_MAX_DEVIATION).clamp(-1.0, 1.0)
}

/// Frequency multiplier of `channel` for a given spread.
///
/// `channel` is the 0-based index; its harmonic is `channel + 1`.
#[inline]
pub fn intone_ratio(spread: f32, channel: usize) -> f32 {
    let harmonic = (channel + 1) as f32;
    if spread >= 0.0 {
        1.0 + spread * (harmonic - 1.0)
    } else {
        1.0 + (-spread) * (1.0 / harmonic - 1.0)
    }
}

/// Target frequency of one channel, combining TIME, INTONE and their CVs.
pub fn map_frequency(
    time: f32,
    time_cv: f32,
    intone: f32,
    intone_cv: f32,
    range: Range,
    channel: usize,
) -> f32 {
    let identity = identity_frequency(time, time_cv, range);
    channel_frequency(identity, intone_spread(intone, intone_cv), channel)
}

/// Frequency of `channel` once IDENTITY and the spread are known.
///
/// The block loop computes IDENTITY and the spread once per sample and calls
/// this for each channel; `map_frequency` is the same path for one channel.
#[inline]
pub fn channel_frequency(identity: f32, spread: f32, channel: usize) -> f32 {
    (identity * intone_ratio(spread, channel)).max(MIN_FREQUENCY)
}
