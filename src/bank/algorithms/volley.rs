//! VOLLEY: a trigger fires a counted burst of cycles.
//!
//! RUN sets the burst length when the trigger arrives. Below -0.8 the channel
//! is choked and ignores triggers; from there to +1 the count grows linearly
//! from 1 to 36. A new trigger mid-burst restarts both the phase and the count.

use super::{emit, rest, start, SampleCtx};
use crate::bank::channel::{Channel, SlopeState};
use crate::dsp::slope::{rise_fraction, wrap_phase};

pub const CHOKE_RUN: f32 = -0.8;
pub const MAX_BURSTS: u32 = 36;

/// Number of cycles a trigger fires at this RUN setting. 0 means choked.
pub fn burst_count(run: f32) -> u32 {
    let run = run.clamp(-1.0, 1.0);
    if run < CHOKE_RUN {
        return 0;
    }
    let normalized = (run - CHOKE_RUN) / (1.0 - CHOKE_RUN);
    1 + (normalized * (MAX_BURSTS - 1) as f32).round() as u32
}

/// RUN value that asks for exactly `count` cycles.
pub fn run_for_bursts(count: u32) -> f32 {
    let count = count.clamp(1, MAX_BURSTS);
    CHOKE_RUN + (1.0 - CHOKE_RUN) * (count - 1) as f32 / (MAX_BURSTS - 1) as f32
}

pub fn tick(channel: &mut Channel, ctx: &SampleCtx) -> f32 {
    channel.end_of_cycle = false;

    let mut started = false;
    if ctx.gate.rising {
        channel.burst_counter = burst_count(ctx.run);
        if channel.burst_counter == 0 {
            return rest(channel);
        }
        start(channel);
        started = true;
    }

    if !channel.state.is_active() || channel.burst_counter == 0 {
        channel.burst_counter = 0;
        return rest(channel);
    }

    if !started {
        let next = channel.phase + ctx.increment();
        if next >= 1.0 {
            channel.end_of_cycle = true;
            channel.burst_counter -= 1;
            if channel.burst_counter == 0 {
                return rest(channel);
            }
        }
        channel.phase = wrap_phase(next);
    }

    channel.state = if channel.phase < rise_fraction(ctx.rise) {
        SlopeState::Rising
    } else {
        SlopeState::Falling
    };
    emit(channel, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::algorithms::test_support::*;

    #[test]
    fn burst_count_mapping() {
        assert_eq!(burst_count(-1.0), 0);
        assert_eq!(burst_count(-0.81), 0);
        assert_eq!(burst_count(CHOKE_RUN), 1);
        assert_eq!(burst_count(1.0), MAX_BURSTS);
        for count in 1..=MAX_BURSTS {
            assert_eq!(burst_count(run_for_bursts(count)), count);
        }
    }

    /// Count completed cycles until the channel falls silent.
    fn cycles_until_silent(ch: &mut Channel, c: SampleCtx, limit: usize) -> usize {
        let mut cycles = 0;
        for _ in 0..limit {
            tick(ch, &c);
            if ch.end_of_cycle() {
                cycles += 1;
            }
            if ch.state() == SlopeState::Idle {
                break;
            }
        }
        cycles
    }

    #[test]
    fn six_bursts_then_silence() {
        let mut ch = Channel::new(0);
        let mut c = ctx(50.0); // 20 samples per cycle
        c.run = run_for_bursts(6);

        tick(&mut ch, &trigger(c));
        assert_eq!(ch.burst_counter(), 6);
        assert_eq!(cycles_until_silent(&mut ch, c, 10_000), 6);
        assert_eq!(ch.burst_counter(), 0);

        for _ in 0..200 {
            assert_eq!(tick(&mut ch, &c), -1.0);
        }
    }

    #[test]
    fn retrigger_restarts_count() {
        let mut ch = Channel::new(0);
        let mut c = ctx(50.0);
        c.run = run_for_bursts(6);

        tick(&mut ch, &trigger(c));
        let mut cycles = 0;
        while cycles < 3 {
            tick(&mut ch, &c);
            if ch.end_of_cycle() {
                cycles += 1;
            }
        }
        assert_eq!(ch.burst_counter(), 3);

        tick(&mut ch, &trigger(c));
        assert_eq!(ch.burst_counter(), 6);
        assert_eq!(ch.phase(), 0.0);
        assert_eq!(cycles_until_silent(&mut ch, c, 10_000), 6);
    }

    #[test]
    fn choked_run_stays_silent() {
        let mut ch = Channel::new(0);
        let mut c = ctx(50.0);
        c.run = -0.95;
        assert_eq!(tick(&mut ch, &trigger(c)), -1.0);
        for _ in 0..100 {
            assert_eq!(tick(&mut ch, &c), -1.0);
        }
    }
}
