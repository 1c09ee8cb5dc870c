//! Bank configuration and global parameters.
//!
//! `BankConfig` is fixed at construction. `Params` is the owned snapshot a host
//! edits between blocks; `BlockParams` is what `SlopeBank::process` reads, with
//! the audio-rate parameters as slices so they can move every sample.

use crate::bank::mode::{Mode, Range};
use crate::dsp::cv::finite_or;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction-time settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankConfig {
    pub sample_rate: f32,
    /// Slots in the control message queue.
    pub queue_capacity: usize,
    /// Gate/trigger lanes are high strictly above this level.
    pub trigger_threshold: f32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            queue_capacity: 64,
            trigger_threshold: 0.1,
        }
    }
}

impl BankConfig {
    pub fn new(sample_rate: f32) -> Self {
        Self::default().sample_rate(sample_rate)
    }

    pub fn sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = finite_or(sample_rate, 48_000.0).max(1.0);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn trigger_threshold(mut self, threshold: f32) -> Self {
        self.trigger_threshold = finite_or(threshold, 0.1).clamp(0.001, 1.0);
        self
    }
}

/// Owned snapshot of the global controls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub time: f32,
    pub intone: f32,
    pub ramp: f32,
    pub curve: f32,
    pub range: Range,
    pub mode: Mode,
    pub run: f32,
    pub fm_index: f32,
    pub run_enabled: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            time: 0.5,
            intone: 0.5,
            ramp: 0.5,
            curve: 0.5,
            range: Range::Shape,
            mode: Mode::Transient,
            run: 0.0,
            fm_index: 0.0,
            run_enabled: false,
        }
    }
}

fn unit(value: f32, default: f32) -> f32 {
    finite_or(value, default).clamp(0.0, 1.0)
}

fn bipolar(value: f32) -> f32 {
    finite_or(value, 0.0).clamp(-1.0, 1.0)
}

impl Params {
    pub fn time(mut self, time: f32) -> Self {
        self.time = unit(time, 0.5);
        self
    }

    pub fn intone(mut self, intone: f32) -> Self {
        self.intone = unit(intone, 0.5);
        self
    }

    pub fn ramp(mut self, ramp: f32) -> Self {
        self.ramp = unit(ramp, 0.5);
        self
    }

    pub fn curve(mut self, curve: f32) -> Self {
        self.curve = unit(curve, 0.5);
        self
    }

    pub fn range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn run(mut self, run: f32) -> Self {
        self.run = bipolar(run);
        self
    }

    pub fn fm_index(mut self, fm_index: f32) -> Self {
        self.fm_index = bipolar(fm_index);
        self
    }

    pub fn run_enabled(mut self, enabled: bool) -> Self {
        self.run_enabled = enabled;
        self
    }

    /// Borrow as constant-for-the-block parameters.
    pub fn block(&self) -> BlockParams<'_> {
        BlockParams {
            time: std::slice::from_ref(&self.time),
            intone: std::slice::from_ref(&self.intone),
            ramp: std::slice::from_ref(&self.ramp),
            curve: std::slice::from_ref(&self.curve),
            run: std::slice::from_ref(&self.run),
            fm_index: std::slice::from_ref(&self.fm_index),
            range: self.range,
            mode: self.mode,
            run_enabled: self.run_enabled,
        }
    }
}

/// Parameters for one call to `SlopeBank::process`.
///
/// Audio-rate fields hold either one value for the whole block or one value
/// per sample. An empty slice means "use the default".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams<'a> {
    pub time: &'a [f32],
    pub intone: &'a [f32],
    pub ramp: &'a [f32],
    pub curve: &'a [f32],
    pub run: &'a [f32],
    pub fm_index: &'a [f32],
    pub range: Range,
    pub mode: Mode,
    pub run_enabled: bool,
}

impl Default for BlockParams<'_> {
    fn default() -> Self {
        BlockParams {
            time: &[],
            intone: &[],
            ramp: &[],
            curve: &[],
            run: &[],
            fm_index: &[],
            range: Range::Shape,
            mode: Mode::Transient,
            run_enabled: false,
        }
    }
}

/// Value of an audio-rate parameter at `index`. Past the end the last value
/// holds; non-finite values fall back to `default`.
#[inline]
pub fn param_at(values: &[f32], index: usize, default: f32) -> f32 {
    let value = match values.get(index) {
        Some(&value) => value,
        None => values.last().copied().unwrap_or(default),
    };
    finite_or(value, default)
}

/// Whether a parameter may change every sample or only between blocks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRate {
    Audio,
    Block,
}

/// Host-facing description of one parameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub rate: ParamRate,
}

const fn descriptor(
    name: &'static str,
    min: f32,
    max: f32,
    default: f32,
    rate: ParamRate,
) -> ParamDescriptor {
    ParamDescriptor {
        name,
        min,
        max,
        default,
        rate,
    }
}

pub const PARAM_DESCRIPTORS: [ParamDescriptor; 9] = [
    descriptor("time", 0.0, 1.0, 0.5, ParamRate::Audio),
    descriptor("intone", 0.0, 1.0, 0.5, ParamRate::Audio),
    descriptor("ramp", 0.0, 1.0, 0.5, ParamRate::Audio),
    descriptor("curve", 0.0, 1.0, 0.5, ParamRate::Audio),
    descriptor("range", 0.0, 1.0, 0.0, ParamRate::Block),
    descriptor("mode", 0.0, 2.0, 0.0, ParamRate::Block),
    descriptor("run", -1.0, 1.0, 0.0, ParamRate::Audio),
    descriptor("fmIndex", -1.0, 1.0, 0.0, ParamRate::Audio),
    descriptor("runEnabled", 0.0, 1.0, 0.0, ParamRate::Block),
];

/// Look up a descriptor by its host name.
pub fn descriptor_named(name: &str) -> Option<&'static ParamDescriptor> {
    PARAM_DESCRIPTORS.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_into_domain() {
        let params = Params::default()
            .time(2.0)
            .intone(-1.0)
            .run(-3.0)
            .fm_index(f32::NAN)
            .curve(f32::INFINITY);
        assert_eq!(params.time, 1.0);
        assert_eq!(params.intone, 0.0);
        assert_eq!(params.run, -1.0);
        assert_eq!(params.fm_index, 0.0);
        assert_eq!(params.curve, 0.5);
    }

    #[test]
    fn param_at_holds_last_value() {
        let values = [0.1, 0.2, 0.3];
        assert_eq!(param_at(&values, 1, 0.5), 0.2);
        assert_eq!(param_at(&values, 10, 0.5), 0.3);
        assert_eq!(param_at(&[], 0, 0.5), 0.5);
        assert_eq!(param_at(&[f32::NAN], 0, 0.5), 0.5);
    }

    #[test]
    fn block_view_matches_snapshot() {
        let params = Params::default().time(0.25).mode(Mode::Cycle).run_enabled(true);
        let block = params.block();
        assert_eq!(param_at(block.time, 100, 0.5), 0.25);
        assert_eq!(block.mode, Mode::Cycle);
        assert!(block.run_enabled);
    }

    #[test]
    fn config_builder_floors_values() {
        let config = BankConfig::new(0.0).queue_capacity(0).trigger_threshold(5.0);
        assert_eq!(config.sample_rate, 1.0);
        assert_eq!(config.queue_capacity, 1);
        assert_eq!(config.trigger_threshold, 1.0);
    }

    #[test]
    fn descriptors_match_defaults() {
        let defaults = Params::default();
        assert_eq!(descriptor_named("time").map(|d| d.default), Some(defaults.time));
        assert_eq!(descriptor_named("fmIndex").map(|d| d.rate), Some(ParamRate::Audio));
        assert_eq!(descriptor_named("mode").map(|d| d.max), Some(2.0));
        assert!(descriptor_named("volume").is_none());

        for d in PARAM_DESCRIPTORS.iter() {
            assert!(d.min <= d.default && d.default <= d.max, "{}", d.name);
        }
    }
}
