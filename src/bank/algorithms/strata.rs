//! STRATA: attack, release-to-sustain, sustain, release.
//!
//! ```text
//!   +1 ┤   ╱╲
//!      │  ╱  ╲_______          sustain level = RUN
//!      │ ╱           ╲
//!   -1 ┤╱             ╲___
//!       gate on    gate off
//! ```
//!
//! After the rise peaks, the level decays at the fall rate to the sustain level
//! instead of holding at +1. While sustaining it follows RUN with the same
//! rates, so RUN can be modulated at audio rate without clicks.

use super::sustain::apply_gate;
use super::{approach, sync_phase_to_level, SampleCtx, REST};
use crate::bank::channel::{Channel, SlopeState};
use crate::dsp::curve::shape;

/// Sustain level for a RUN value. The bipolar output range is the RUN range.
#[inline]
pub fn sustain_level(run: f32) -> f32 {
    run.clamp(-1.0, 1.0)
}

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.end_of_cycle = false;
    apply_gate(channel, ctx);

    let sustain = sustain_level(ctx.run);
    let up = ctx.rise_step();
    let down = ctx.fall_step();

    match channel.state {
        SlopeState::Idle => {
            channel.level = REST;
        }
        SlopeState::Rising => {
            channel.level += up;
            if channel.level >= 1.0 {
                channel.level = 1.0;
                channel.state = if sustain >= 1.0 {
                    SlopeState::Sustaining
                } else {
                    SlopeState::ReleaseToSustain
                };
            }
        }
        SlopeState::ReleaseToSustain => {
            if !ctx.gate.high {
                channel.state = SlopeState::Falling;
            } else {
                channel.level = approach(channel.level, sustain, up, down);
                if channel.level == sustain {
                    channel.state = SlopeState::Sustaining;
                }
            }
        }
        SlopeState::Sustaining => {
            if ctx.gate.high {
                channel.level = approach(channel.level, sustain, up, down);
            } else {
                channel.state = SlopeState::Falling;
            }
        }
        SlopeState::Falling => {
            channel.level -= down;
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
