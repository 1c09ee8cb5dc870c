//! FLOOM: two-operator FM.
//!
//! Each channel carries a hidden sine modulator at `carrier * 2^run`, so RUN
//! sweeps the ratio from 0.5 to 2. The modulator wobbles the carrier
//! frequency by up to `|fm_index|` times the carrier itself:
//!
//! ```text
//!   f(t) = carrier * (1 + |index| * sin(2π * mod_phase))
//! ```
//!
//! A rising edge hard-syncs both operators.

use std::f32::consts::TAU;

use super::{advance_free, emit, SampleCtx};
use crate::bank::channel::Channel;
use crate::dsp::slope::{phase_increment, wrap_phase};

/// Instantaneous carrier frequency for a modulator value in [-1, 1].
#[inline]
pub fn carrier_frequency(carrier: f32, modulator: f32, fm_index: f32) -> f32 {
    carrier * (1.0 + fm_index.abs().min(1.0) * modulator)
}

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    if ctx.gate.rising {
        channel.phase = 0.0;
        channel.modulator_phase = 0.0;
        channel.end_of_cycle = false;
        return emit(channel, ctx);
    }

    let ratio = ctx.run.clamp(-1.0, 1.0).exp2();
    let modulator = (TAU * channel.modulator_phase).sin();
    channel.modulator_phase = wrap_phase(
        channel.modulator_phase + phase_increment(ctx.frequency * ratio, ctx.inv_sample_rate),
    );

    let frequency = carrier_frequency(ctx.frequency, modulator, ctx.fm_index);
    channel.end_of_cycle = advance_free(channel, phase_increment(frequency, ctx.inv_sample_rate));
    emit(channel, ctx)
}
