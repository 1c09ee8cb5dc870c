//! Standard TRANSIENT: a triggered attack/release slope.
//!
//! A rising edge starts the slope only when the channel is idle; triggers
//! arriving mid-cycle are ignored. The slope rises for `rise` of a cycle,
//! falls for the rest, and rests at -1 until the next accepted trigger.

use super::{one_shot, start, SampleCtx};
use crate::bank::channel::Channel;

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.end_of_cycle = false;

    let started = ctx.gate.rising && !channel.state.is_active();
    if started {
        start(channel);
    }
    one_shot(channel, ctx, started)
}
