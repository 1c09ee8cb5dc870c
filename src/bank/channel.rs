/// Where a channel's slope currently is.
///
/// Not every algorithm uses every state: CYCLE never leaves `Idle`, only
/// STRATA enters `ReleaseToSustain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlopeState {
    #[default]
    Idle, // at rest, output -1
    Rising,           // phase or level moving toward +1
    Sustaining,       // holding while the gate is high
    Falling,          // moving back toward -1
    ReleaseToSustain, // STRATA: decaying from the peak to the sustain level
}

impl SlopeState {
    pub fn is_active(self) -> bool {
        !matches!(self, SlopeState::Idle)
    }
}

/// Edge information for one channel at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GateSense {
    /// Lane above threshold (or held by a message gate).
    pub high: bool,
    /// Went high on this sample.
    pub rising: bool,
    /// Went low on this sample.
    pub falling: bool,
    /// Cascaded input level, clamped to [0, 1]. Message gates read as 1.
    pub velocity: f32,
}

/// Per-channel generator state.
///
/// Six of these live in a fixed array inside `SlopeBank` for the lifetime of
/// the bank. Only the algorithms in `bank::algorithms` write to them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Channel {
    pub(crate) index: usize,

    // Core slope state
    pub(crate) phase: f32,      // [0, 1)
    pub(crate) state: SlopeState,
    pub(crate) level: f32,      // slope before shaping, [-1, 1]
    pub(crate) end_of_cycle: bool,

    // RUN variant state, zero while unused
    pub(crate) burst_counter: u32,   // VOLLEY
    pub(crate) lpg_envelope: f32,    // PLUME, [0, 1]
    pub(crate) modulator_phase: f32, // FLOOM, [0, 1)

    // Edge detection memory
    pub(crate) prev_gate_input: f32,
    pub(crate) prev_message_gate: bool, // message gate or trigger pulse
}

impl Channel {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            level: -1.0,
            ..Self::default()
        }
    }

    /// Zero the RUN variant fields. Called when the active cell changes.
    pub(crate) fn clear_variant_state(&mut self) {
        self.burst_counter = 0;
        self.lpg_envelope = 0.0;
        self.modulator_phase = 0.0;
    }

    /// Return to the power-on state, keeping the channel index.
    pub fn reset(&mut self) {
        *self = Self::new(self.index);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn state(&self) -> SlopeState {
        self.state
    }

    /// Slope value before curve shaping.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn burst_counter(&self) -> u32 {
        self.burst_counter
    }

    pub fn lpg_envelope(&self) -> f32 {
        self.lpg_envelope
    }

    pub fn modulator_phase(&self) -> f32 {
        self.modulator_phase
    }

    /// True on the sample where the slope finished a cycle.
    pub fn end_of_cycle(&self) -> bool {
        self.end_of_cycle
    }

    /// Fold a new gate sample into the edge detector.
    pub(crate) fn sense(
        &mut self,
        input: f32,
        message_gate: bool,
        pulse: bool,
        threshold: f32,
    ) -> GateSense {
        let input = if input.is_finite() { input } else { 0.0 };
        let held = message_gate || pulse;
        let high = input > threshold || held;
        let was_high = self.prev_gate_input > threshold || self.prev_message_gate;
        let sense = GateSense {
            high,
            rising: high && !was_high,
            falling: !high && was_high,
            velocity: if held {
                1.0
            } else {
                input.clamp(0.0, 1.0)
            },
        };

        self.prev_gate_input = input;
        self.prev_message_gate = held;
        sense
    }
}
