//! SHIFT: an AR slope whose retrigger point is set by RUN.
//!
//! ```text
//!   run = -1   retrigger anywhere
//!   run =  0   retrigger once the rise has finished
//!   run = +1   retrigger only after the full cycle (standard TRANSIENT)
//! ```
//!
//! In between, the accepted region slides linearly; see
//! [`retrigger_threshold`](super::retrigger_threshold).

use super::{one_shot, retrigger_threshold, start, SampleCtx};
use crate::bank::channel::Channel;

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.end_of_cycle = false;

    let started = ctx.gate.rising && accepts_trigger(channel, ctx);
    if started {
        start(channel);
    }
    one_shot(channel, ctx, started)
}

fn accepts_trigger(channel: &Channel, ctx: &SampleCtx) -> bool {
    !channel.state.is_active() || channel.phase >= retrigger_threshold(ctx.run, ctx.rise)
}
