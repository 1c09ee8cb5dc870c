//! Per-sample algorithms, one module per behaviour.
//!
//! Every algorithm has the same shape: `tick(&mut Channel, &SampleCtx) -> f32`.
//! It reacts to the gate edges in the context, moves the channel's phase or
//! level, and returns the curve-shaped output for this sample. They share the
//! helpers below so the phase bookkeeping reads the same everywhere:
//!
//! 1. A sample that accepts a trigger resets the phase to exactly 0 and emits.
//! 2. Any other active sample advances the phase first, then emits.
//! 3. An idle channel emits the rest value, -1.

use crate::bank::channel::{Channel, GateSense, SlopeState};
use crate::dsp::curve::shape;
use crate::dsp::slope::{self, falling_phase_for, phase_increment, rising_phase_for, rise_fraction};

/// Standard cycling LFO / VCO.
pub mod cycle;
/// FLOOM: two-operator FM oscillator.
pub mod floom;
/// PLUME: oscillator through a vactrol low pass gate.
pub mod plume;
/// SHIFT: AR envelope with a settable retrigger point.
pub mod shift;
/// SPILL: impulse trains clocked by IDENTITY.
pub mod spill;
/// STRATA: ARSR envelope.
pub mod strata;
/// Standard ASR envelope.
pub mod sustain;
/// Standard AR envelope.
pub mod transient;
/// VOLLEY: counted bursts of cycles.
pub mod volley;

/// Output of a channel at rest.
pub const REST: f32 = -1.0;

/// Everything an algorithm needs to know about the current sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleCtx {
    /// Target frequency of this channel in Hz.
    pub frequency: f32,
    pub sample_rate: f32,
    pub inv_sample_rate: f32,
    /// Rise fraction from RAMP, already clamped.
    pub rise: f32,
    pub curve: f32,
    /// RUN amount, [-1, 1].
    pub run: f32,
    /// FM index, [-1, 1].
    pub fm_index: f32,
    pub gate: GateSense,
    /// IDENTITY finished a cycle on this sample (SPILL clock).
    pub identity_eoc: bool,
}

impl SampleCtx {
    pub fn new(frequency: f32, sample_rate: f32) -> Self {
        let sample_rate = sample_rate.max(1.0);
        Self {
            frequency,
            sample_rate,
            inv_sample_rate: 1.0 / sample_rate,
            rise: 0.5,
            curve: 0.5,
            run: 0.0,
            fm_index: 0.0,
            gate: GateSense::default(),
            identity_eoc: false,
        }
    }

    /// Phase step per sample at this channel's frequency.
    #[inline]
    pub fn increment(&self) -> f32 {
        phase_increment(self.frequency, self.inv_sample_rate)
    }

    /// Level step per sample for a full -1 → +1 rise.
    #[inline]
    pub fn rise_step(&self) -> f32 {
        2.0 * self.increment() / rise_fraction(self.rise)
    }

    /// Level step per sample for a full +1 → -1 fall.
    #[inline]
    pub fn fall_step(&self) -> f32 {
        2.0 * self.increment() / (1.0 - rise_fraction(self.rise))
    }
}

/// Shape the slope at the channel's current phase and remember the raw level.
#[inline]
pub(crate) fn emit(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.level = slope::slope(channel.phase, ctx.rise);
    shape(channel.level, ctx.curve)
}

/// Put the channel at rest.
#[inline]
pub(crate) fn rest(channel: &mut Channel) -> f32 {
    channel.state = SlopeState::Idle;
    channel.phase = 0.0;
    channel.level = REST;
    REST
}

/// Free-running advance. Returns true when the phase wrapped.
#[inline]
pub(crate) fn advance_free(channel: &mut Channel, increment: f32) -> bool {
    let next = channel.phase + increment;
    channel.phase = slope::wrap_phase(next);
    next >= 1.0
}

/// Start a one-shot slope from the bottom.
#[inline]
pub(crate) fn start(channel: &mut Channel) {
    channel.state = SlopeState::Rising;
    channel.phase = 0.0;
}

/// Run a one-shot rise/fall to completion, then rest.
///
/// `started` is true when a trigger was accepted on this sample; the phase is
/// left at 0 for that sample.
pub(crate) fn one_shot(channel: &mut Channel, ctx: &SampleCtx, started: bool) -> f32 {
    settle_foreign_state(channel, ctx.rise);

    if !channel.state.is_active() {
        return rest(channel);
    }

    if !started {
        let next = channel.phase + ctx.increment();
        if next >= 1.0 {
            channel.end_of_cycle = true;
            return rest(channel);
        }
        channel.phase = next;
    }

    let rise = rise_fraction(ctx.rise);
    channel.state = if channel.phase < rise {
        SlopeState::Rising
    } else {
        SlopeState::Falling
    };
    emit(channel, ctx)
}

/// Map states that a one-shot slope does not use onto the falling segment, so
/// switching cells mid-envelope continues from the current level.
#[inline]
pub(crate) fn settle_foreign_state(channel: &mut Channel, rise: f32) {
    if matches!(
        channel.state,
        SlopeState::Sustaining | SlopeState::ReleaseToSustain
    ) {
        channel.phase = falling_phase_for(channel.level, rise);
        channel.state = if channel.level <= REST {
            SlopeState::Idle
        } else {
            SlopeState::Falling
        };
    }
}

/// Keep `phase` consistent with a level-driven envelope, for cell switches.
#[inline]
pub(crate) fn sync_phase_to_level(channel: &mut Channel, rise: f32) {
    channel.phase = match channel.state {
        SlopeState::Rising => rising_phase_for(channel.level, rise),
        SlopeState::Idle => 0.0,
        _ => falling_phase_for(channel.level, rise),
    };
}

/// Earliest phase at which an active one-shot accepts a new trigger.
///
/// `run = -1` always retriggers, `run = 0` once the rise is done, `run = +1`
/// only when idle (threshold 1 is never reached by an active phase).
#[inline]
pub fn retrigger_threshold(run: f32, rise: f32) -> f32 {
    let run = run.clamp(-1.0, 1.0);
    let rise = rise_fraction(rise);
    if run < 0.0 {
        rise * (1.0 + run)
    } else {
        rise + run * (1.0 - rise)
    }
}

/// Move `value` toward `target` by at most `up` or `down` per call.
#[inline]
pub(crate) fn approach(value: f32, target: f32, up: f32, down: f32) -> f32 {
    if value < target {
        (value + up).min(target)
    } else {
        (value - down).max(target)
    }
}
