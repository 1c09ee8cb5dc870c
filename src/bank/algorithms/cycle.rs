//! Standard CYCLE: free-running slope (LFO in SHAPE, VCO in SOUND).
//!
//! A rising edge hard-syncs the phase to 0 and never touches `state`.

use super::{advance_free, emit, SampleCtx};
use crate::bank::channel::Channel;

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    if ctx.gate.rising {
        channel.phase = 0.0;
        channel.end_of_cycle = false;
    } else {
        channel.end_of_cycle = advance_free(channel, ctx.increment());
    }
    emit(channel, ctx)
}
