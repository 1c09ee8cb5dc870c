// Purpose - host stream layout: borrowed input views, output slices, owned buffers

use crate::CHANNELS;

/// Host input streams: 5 CVs then 6 trigger/gate lanes.
pub const INPUT_STREAMS: usize = 11;
/// Host output streams: 6 channels then MIX.
pub const OUTPUT_STREAMS: usize = CHANNELS + 1;

pub const TIME_CV: usize = 0;
pub const FM_INPUT: usize = 1;
pub const INTONE_CV: usize = 2;
pub const RUN_CV: usize = 3;
pub const RAMP_CV: usize = 4;
pub const FIRST_TRIGGER: usize = 5;
pub const MIX_OUTPUT: usize = CHANNELS;

/// Borrowed view of the input streams for one block. `None` is an unpatched
/// jack: CVs read as 0, trigger lanes fall through the cascade.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalInputs<'a> {
    pub time_cv: Option<&'a [f32]>,
    pub fm: Option<&'a [f32]>,
    pub intone_cv: Option<&'a [f32]>,
    pub run_cv: Option<&'a [f32]>,
    pub ramp_cv: Option<&'a [f32]>,
    pub triggers: [Option<&'a [f32]>; CHANNELS],
}

impl<'a> SignalInputs<'a> {
    /// Build from the host's 11-stream layout. Missing trailing streams are
    /// unpatched.
    pub fn from_streams(streams: &[Option<&'a [f32]>]) -> Self {
        let at = |index: usize| streams.get(index).copied().flatten();
        Self {
            time_cv: at(TIME_CV),
            fm: at(FM_INPUT),
            intone_cv: at(INTONE_CV),
            run_cv: at(RUN_CV),
            ramp_cv: at(RAMP_CV),
            triggers: std::array::from_fn(|channel| at(FIRST_TRIGGER + channel)),
        }
    }

    pub fn trigger(mut self, channel: usize, stream: &'a [f32]) -> Self {
        if let Some(slot) = self.triggers.get_mut(channel) {
            *slot = Some(stream);
        }
        self
    }
}

/// Read sample `index` of an optional CV stream, 0 when unpatched or short.
#[inline]
pub fn cv_at(stream: Option<&[f32]>, index: usize) -> f32 {
    match stream.and_then(|s| s.get(index)) {
        Some(&value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// The seven output slices written by one block.
#[derive(Debug)]
pub struct SignalOutputs<'a> {
    pub channels: [&'a mut [f32]; CHANNELS],
    pub mix: &'a mut [f32],
}

impl SignalOutputs<'_> {
    /// Samples in this block: the shortest of the seven slices.
    pub fn len(&self) -> usize {
        self.channels
            .iter()
            .map(|c| c.len())
            .fold(self.mix.len(), usize::min)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned storage for the seven outputs.
#[derive(Debug, Default, Clone)]
pub struct OutputBuffers {
    pub buffers: [Vec<f32>; OUTPUT_STREAMS],
}

impl OutputBuffers {
    pub fn new(len: usize) -> Self {
        Self {
            buffers: std::array::from_fn(|_| vec![0.0; len]),
        }
    }

    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.buffers[index]
    }

    pub fn mix(&self) -> &[f32] {
        &self.buffers[MIX_OUTPUT]
    }

    /// Mutable view of the first `len` samples of every output.
    pub fn view(&mut self, len: usize) -> SignalOutputs<'_> {
        let len = len.min(self.len());
        let [c0, c1, c2, c3, c4, c5, mix] = &mut self.buffers;
        SignalOutputs {
            channels: [
                &mut c0[..len],
                &mut c1[..len],
                &mut c2[..len],
                &mut c3[..len],
                &mut c4[..len],
                &mut c5[..len],
            ],
            mix: &mut mix[..len],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_map_to_named_inputs() {
        let time = [0.1];
        let trig5 = [1.0];
        let mut streams: [Option<&[f32]>; INPUT_STREAMS] = [None; INPUT_STREAMS];
        streams[TIME_CV] = Some(&time[..]);
        streams[FIRST_TRIGGER + 5] = Some(&trig5[..]);

        let inputs = SignalInputs::from_streams(&streams);
        assert_eq!(inputs.time_cv, Some(&time[..]));
        assert!(inputs.fm.is_none());
        assert_eq!(inputs.triggers[5], Some(&trig5[..]));
        assert!(inputs.triggers[0].is_none());
    }

    #[test]
    fn short_stream_list_is_unpatched() {
        let time = [0.3];
        let inputs = SignalInputs::from_streams(&[Some(&time[..])]);
        assert!(inputs.triggers.iter().all(Option::is_none));
        assert_eq!(cv_at(inputs.time_cv, 0), 0.3);
        assert_eq!(cv_at(inputs.time_cv, 4), 0.0);
        assert_eq!(cv_at(inputs.ramp_cv, 0), 0.0);
    }

    #[test]
    fn view_borrows_all_seven() {
        let mut buffers = OutputBuffers::new(8);
        {
            let mut out = buffers.view(4);
            assert_eq!(out.len(), 4);
            out.mix[0] = 1.0;
            out.channels[5][3] = 2.0;
        }
        assert_eq!(buffers.mix()[0], 1.0);
        assert_eq!(buffers.channel(5)[3], 2.0);
        assert_eq!(buffers.view(100).len(), 8);
    }
}
