//! Standard SUSTAIN: gate-driven attack/sustain/release.
//!
//! Unlike TRANSIENT this is level driven. The gate's rising edge sends the
//! level toward +1 at the rise rate, the falling edge sends it back toward -1
//! at the fall rate, from wherever it is.

use super::{sync_phase_to_level, SampleCtx, REST};
use crate::bank::channel::{Channel, SlopeState};
use crate::dsp::curve::shape;

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.end_of_cycle = false;
    apply_gate(channel, ctx);

    match channel.state {
        SlopeState::Idle => {
            channel.level = REST;
        }
        SlopeState::Rising => {
            channel.level += ctx.rise_step();
            if channel.level >= 1.0 {
                channel.level = 1.0;
                channel.state = SlopeState::Sustaining;
            }
        }
        SlopeState::Sustaining | SlopeState::ReleaseToSustain => {
            if ctx.gate.high {
                channel.level = 1.0;
                channel.state = SlopeState::Sustaining;
            } else {
                channel.state = SlopeState::Falling;
            }
        }
        SlopeState::Falling => {
            channel.level -= ctx.fall_step();
            if channel.level <= REST {
                channel.level = REST;
                channel.state = SlopeState::Idle;
                channel.end_of_cycle = true;
            }
        }
    }

    sync_phase_to_level(channel, ctx.rise);
    shape(channel.level, ctx.curve)
}

/// Gate edges shared by SUSTAIN and STRATA.
pub(crate) fn apply_gate(channel: &mut Channel, ctx: &SampleCtx) {
    if ctx.gate.rising && matches!(channel.state, SlopeState::Idle | SlopeState::Falling) {
        channel.state = SlopeState::Rising;
    } else if ctx.gate.falling
        && matches!(
            channel.state,
            SlopeState::Rising | SlopeState::Sustaining | SlopeState::ReleaseToSustain
        )
    {
        channel.state = SlopeState::Falling;
    }
}
