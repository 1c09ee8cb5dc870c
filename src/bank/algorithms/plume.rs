//! PLUME: a free-running oscillator through a vactrol low pass gate.
//!
//! The oscillator never stops; the gate only opens and closes the LPG. RUN
//! changes the vactrol's speed:
//!
//! ```text
//!   run > 0   both time constants shorter (up to 8x at +1), plucky
//!   run = 0   stock vactrol
//!   run < 0   both longer (up to 8x at -1), and the gate level (velocity)
//!             increasingly sets how far the LPG opens
//! ```

use super::{advance_free, emit, SampleCtx};
use crate::bank::channel::{Channel, SlopeState};
use crate::dsp::lpg::{self, ATTACK_TAU, DECAY_TAU};

/// Envelope level below which a closed gate counts as silent.
const SILENCE: f32 = 1.0e-4;

/// How far the LPG opens for a gate of the given velocity.
#[inline]
pub fn lpg_target(high: bool, velocity: f32, run: f32) -> f32 {
    if !high {
        return 0.0;
    }
    let run = run.clamp(-1.0, 1.0);
    if run >= 0.0 {
        1.0
    } else {
        let sensitivity = -run;
        1.0 + (velocity.clamp(0.0, 1.0) - 1.0) * sensitivity
    }
}

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.end_of_cycle = advance_free(channel, ctx.increment());
    let oscillator = emit(channel, ctx);

    let speed = (3.0 * ctx.run.clamp(-1.0, 1.0)).exp2();
    let attack = lpg::coefficient(ATTACK_TAU / speed, ctx.sample_rate);
    let decay = lpg::coefficient(DECAY_TAU / speed, ctx.sample_rate);
    let target = lpg_target(ctx.gate.high, ctx.gate.velocity, ctx.run);

    channel.lpg_envelope = lpg::follow(channel.lpg_envelope, target, attack, decay);
    channel.state = if ctx.gate.high {
        if channel.lpg_envelope < target - 1.0e-3 {
            SlopeState::Rising
        } else {
            SlopeState::Sustaining
        }
    } else if channel.lpg_envelope > SILENCE {
        SlopeState::Falling
    } else {
        SlopeState::Idle
    };

    oscillator * channel.lpg_envelope
}
