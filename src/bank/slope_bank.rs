use rtrb::{Consumer, RingBuffer};
use tracing::debug;

use crate::bank::algorithms::SampleCtx;
use crate::bank::cascade::CascadeMap;
use crate::bank::channel::Channel;
use crate::bank::message::{BankHandle, ControlMessage, MessageLanes, MessageReceiver};
use crate::bank::mode::{Cell, Range};
use crate::bank::params::{param_at, BankConfig, BlockParams};
use crate::dsp::frequency::{channel_frequency, identity_frequency, intone_spread};
use crate::dsp::mix::{shape_mix, sound_mix};
use crate::io::{cv_at, SignalInputs, SignalOutputs};
use crate::{CHANNELS, MIN_FREQUENCY};

/// Six slope generators sharing one set of global controls.
///
/// All state lives in a fixed array of channels created here; `process`
/// never allocates, locks or logs.
pub struct SlopeBank<R = Consumer<ControlMessage>> {
    config: BankConfig,
    channels: [Channel; CHANNELS],
    cell: Cell,
    lanes: MessageLanes,
    rx: R,
}

impl SlopeBank {
    /// Create a bank and the handle that sends it control messages.
    pub fn new(config: BankConfig) -> (Self, BankHandle) {
        let (tx, rx) = RingBuffer::<ControlMessage>::new(config.queue_capacity.max(1));
        (Self::with_receiver(config, rx), BankHandle::new(tx))
    }
}

impl<R: MessageReceiver> SlopeBank<R> {
    /// Create a bank reading control messages from any receiver.
    pub fn with_receiver(config: BankConfig, rx: R) -> Self {
        debug!(
            sample_rate = config.sample_rate,
            queue_capacity = config.queue_capacity,
            trigger_threshold = config.trigger_threshold,
            "slope bank created"
        );

        Self {
            config,
            channels: std::array::from_fn(Channel::new),
            cell: Cell::TransientShape,
            lanes: MessageLanes::default(),
            rx,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn channels(&self) -> &[Channel; CHANNELS] {
        &self.channels
    }

    /// Algorithm used by the most recent block.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Fold a control message in directly, bypassing the queue. For callers
    /// already on the audio thread.
    pub fn apply(&mut self, message: ControlMessage) {
        self.lanes.apply(message);
    }

    /// Return every channel to rest and drop message state.
    pub fn reset(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.reset();
        }
        self.lanes = MessageLanes::default();
    }

    /// Render one block.
    ///
    /// The block length is the shortest output slice. Messages queued before
    /// this call take effect at its first sample.
    pub fn process(
        &mut self,
        params: &BlockParams,
        inputs: &SignalInputs,
        outputs: &mut SignalOutputs,
    ) {
        self.lanes.drain(&mut self.rx);

        let len = outputs.len();
        if len == 0 {
            return;
        }

        let cascade = CascadeMap::from_inputs(&inputs.triggers);
        let cell = Cell::select(params.mode, params.range, params.run_enabled);
        if cell != self.cell {
            for channel in self.channels.iter_mut() {
                channel.clear_variant_state();
            }
            self.cell = cell;
        }

        let threshold = self.config.trigger_threshold;
        let mut ctx = SampleCtx::new(MIN_FREQUENCY, self.config.sample_rate);

        for i in 0..len {
            let fm_index = param_at(params.fm_index, i, 0.0).clamp(-1.0, 1.0);
            let time_cv = cv_at(inputs.time_cv, i) + cv_at(inputs.fm, i) * fm_index;
            let identity = identity_frequency(param_at(params.time, i, 0.5), time_cv, params.range);
            let spread = intone_spread(param_at(params.intone, i, 0.5), cv_at(inputs.intone_cv, i));

            let ramp = param_at(params.ramp, i, 0.5) + 0.5 * cv_at(inputs.ramp_cv, i);
            ctx.rise = ramp.clamp(0.0, 1.0);
            ctx.curve = param_at(params.curve, i, 0.5).clamp(0.0, 1.0);
            ctx.run = (param_at(params.run, i, 0.0) + cv_at(inputs.run_cv, i)).clamp(-1.0, 1.0);
            ctx.fm_index = fm_index;
            ctx.identity_eoc = false;

            let mut frame = [0.0; CHANNELS];
            for (index, channel) in self.channels.iter_mut().enumerate() {
                let pulse = i == 0 && self.lanes.pulse(index);
                let level = cascade.sample(&inputs.triggers, index, i);
                ctx.gate = channel.sense(level, self.lanes.gate(index), pulse, threshold);
                ctx.frequency = channel_frequency(identity, spread, index);

                let out = cell.tick(channel, &ctx);
                if index == 0 {
                    ctx.identity_eoc = channel.end_of_cycle;
                }
                frame[index] = out;
                outputs.channels[index][i] = out;
            }

            outputs.mix[i] = match params.range {
                Range::Sound => sound_mix(&frame),
                Range::Shape => shape_mix(&frame),
            };
        }

        self.lanes.clear_pulses();
    }
}
