//! Trigger input normalling.

/*
Jack Normalling
===============

The six trigger inputs are normalled downward: an input with nothing patched
listens to the nearest patched input ABOVE it.

    patched:   .    .    .    X    .    X          (X = cable present)
    channel:   0    1    2    3    4    5
    hears:     3    3    3    3    5    5

Plugging into channel 3 breaks the chain: 0-2 now follow 3, while 4 keeps
following 5. With nothing patched anywhere every channel hears silence.

Which jacks are patched can only change between blocks, so the map from
channel to source is resolved once per block. Reading the cascaded value for
a sample is then a single indexed load.
*/

use crate::CHANNELS;

/// Per-block resolution of which trigger input each channel listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeMap {
    sources: [Option<usize>; CHANNELS],
}

impl CascadeMap {
    /// Resolve sources from the set of patched inputs.
    pub fn resolve(connected: [bool; CHANNELS]) -> Self {
        let patched = std::array::from_fn(|channel| connected[channel].then_some(channel));
        Self {
            sources: cascade(patched),
        }
    }

    /// Resolve from optional input streams.
    pub fn from_inputs<T>(inputs: &[Option<T>; CHANNELS]) -> Self {
        let mut connected = [false; CHANNELS];
        for (slot, input) in connected.iter_mut().zip(inputs.iter()) {
            *slot = input.is_some();
        }
        Self::resolve(connected)
    }

    /// Input index `channel` listens to, if any.
    pub fn source(&self, channel: usize) -> Option<usize> {
        self.sources.get(channel).copied().flatten()
    }

    /// Cascaded level for `channel` at sample `index`. Unpatched chains and
    /// short buffers read as 0.
    #[inline]
    pub fn sample(
        &self,
        triggers: &[Option<&[f32]>; CHANNELS],
        channel: usize,
        index: usize,
    ) -> f32 {
        self.source(channel)
            .and_then(|source| triggers[source])
            .and_then(|stream| stream.get(index))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Apply normalling to a set of optional per-channel values.
pub fn cascade<T: Copy>(inputs: [Option<T>; CHANNELS]) -> [Option<T>; CHANNELS] {
    let mut out = [None; CHANNELS];
    let mut last = None;
    for channel in (0..CHANNELS).rev() {
        if inputs[channel].is_some() {
            last = inputs[channel];
        }
        out[channel] = last;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_channel_three_patched() {
        let map = CascadeMap::resolve([false, false, false, true, false, false]);
        for channel in 0..=3 {
            assert_eq!(map.source(channel), Some(3));
        }
        assert_eq!(map.source(4), None);
        assert_eq!(map.source(5), None);
    }

    #[test]
    fn chain_breaks_at_each_patched_input() {
        let map = CascadeMap::resolve([false, false, false, true, false, true]);
        assert_eq!(map.source(0), Some(3));
        assert_eq!(map.source(2), Some(3));
        assert_eq!(map.source(4), Some(5));
        assert_eq!(map.source(5), Some(5));
    }

    #[test]
    fn every_subset_follows_nearest_higher_patch() {
        for mask in 0u32..(1 << CHANNELS) {
            let mut connected = [false; CHANNELS];
            for (channel, slot) in connected.iter_mut().enumerate() {
                *slot = mask & (1 << channel) != 0;
            }
            let map = CascadeMap::resolve(connected);

            for channel in 0..CHANNELS {
                let expected = (channel..CHANNELS).find(|&c| connected[c]);
                assert_eq!(map.source(channel), expected, "mask {mask:06b} channel {channel}");
            }

            // Value-level view agrees with the map.
            let values: [Option<f32>; CHANNELS] =
                std::array::from_fn(|c| connected[c].then_some(c as f32 * 10.0));
            let cascaded = cascade(values);
            for channel in 0..CHANNELS {
                assert_eq!(cascaded[channel], map.source(channel).map(|s| s as f32 * 10.0));
            }
        }
    }

    #[test]
    fn sample_reads_source_stream() {
        let three = [0.0, 1.0, 0.5];
        let five = [0.2, 0.2, 0.2];
        let triggers: [Option<&[f32]>; CHANNELS] =
            [None, None, None, Some(&three[..]), None, Some(&five[..])];
        let map = CascadeMap::from_inputs(&triggers);

        assert_eq!(map.sample(&triggers, 0, 1), 1.0);
        assert_eq!(map.sample(&triggers, 3, 2), 0.5);
        assert_eq!(map.sample(&triggers, 4, 0), 0.2);
        // past the end of a short stream
        assert_eq!(map.sample(&triggers, 0, 10), 0.0);
    }

    #[test]
    fn nothing_patched_reads_silence() {
        let triggers: [Option<&[f32]>; CHANNELS] = [None; CHANNELS];
        let map = CascadeMap::from_inputs(&triggers);
        for channel in 0..CHANNELS {
            assert_eq!(map.sample(&triggers, channel, 0), 0.0);
        }
    }
}
