//! SPILL: IDENTITY-clocked impulse trains.
//!
//! IDENTITY free-runs and ignores its trigger input. Every time it completes a
//! cycle, channels 1-5 receive a trigger (in addition to their own inputs) and
//! fire a one-shot slope at their own INTONE-spread frequency. Because the
//! one-shots are usually shorter or longer than IDENTITY's period, RUN decides
//! what an early trigger does, exactly like SHIFT, except that at fully CCW the
//! slope turns around in place instead of restarting.

use super::{advance_free, emit, one_shot, retrigger_threshold, start, SampleCtx};
use crate::bank::channel::{Channel, SlopeState};
use crate::dsp::slope::{falling_phase_for, rising_phase_for, slope};

/// RUN at or below this reverses the slope instead of retriggering it.
pub const TURN_AROUND_RUN: f32 = -0.99;

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    if channel.index == 0 {
        channel.end_of_cycle = advance_free(channel, ctx.increment());
        return emit(channel, ctx);
    }

    channel.end_of_cycle = false;
    let mut started = false;

    if ctx.gate.rising || ctx.identity_eoc {
        if !channel.state.is_active() {
            start(channel);
            started = true;
        } else if ctx.run <= TURN_AROUND_RUN {
            turn_around(channel, ctx.rise);
        } else if channel.phase >= retrigger_threshold(ctx.run, ctx.rise) {
            start(channel);
            started = true;
        }
    }

    one_shot(channel, ctx, started)
}

/// Reverse direction at the current level.
fn turn_around(channel: &mut Channel, rise: f32) {
    let level = slope(channel.phase, rise);
    match channel.state {
        SlopeState::Rising => {
            channel.phase = falling_phase_for(level, rise);
            channel.state = SlopeState::Falling;
        }
        SlopeState::Falling => {
            channel.phase = rising_phase_for(level, rise);
            channel.state = SlopeState::Rising;
        }
        _ => {}
    }
}
