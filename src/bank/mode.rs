//! Mode × range × RUN dispatch.

/*
The Mode Matrix
===============

Three block-rate switches pick one of twelve per-sample algorithms:

                     RUN off                   RUN on
                 SHAPE       SOUND         SHAPE       SOUND
              ┌───────────┬───────────┬───────────┬───────────┐
   TRANSIENT  │ AR        │ AR        │ SHIFT     │ SPILL     │
              ├───────────┼───────────┼───────────┼───────────┤
   SUSTAIN    │ ASR       │ ASR       │ STRATA    │ PLUME     │
              ├───────────┼───────────┼───────────┼───────────┤
   CYCLE      │ LFO       │ VCO       │ VOLLEY    │ FLOOM     │
              └───────────┴───────────┴───────────┴───────────┘

The table is resolved once per block into a `Cell`. Every (mode, range, run)
triple has exactly one cell, and `Cell::tick` matches on all twelve, so an
unhandled combination is a compile error rather than a runtime surprise.
*/

use crate::bank::algorithms::{self, SampleCtx};
use crate::bank::channel::Channel;
pub use crate::dsp::frequency::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fundamental behaviour shared by all six channels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Triggered attack/release.
    #[default]
    Transient,
    /// Gated attack/sustain/release.
    Sustain,
    /// Free running.
    Cycle,
}

impl Mode {
    pub fn index(self) -> usize {
        match self {
            Mode::Transient => 0,
            Mode::Sustain => 1,
            Mode::Cycle => 2,
        }
    }

    /// Decode the numeric host parameter (0 = TRANSIENT, 1 = SUSTAIN, 2 = CYCLE).
    pub fn from_value(value: f32) -> Self {
        if value >= 1.5 {
            Mode::Cycle
        } else if value >= 0.5 {
            Mode::Sustain
        } else {
            Mode::Transient
        }
    }
}

/// One of the twelve per-sample algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    TransientShape,
    TransientSound,
    SustainShape,
    SustainSound,
    CycleShape,
    CycleSound,
    Shift,
    Spill,
    Strata,
    Plume,
    Volley,
    Floom,
}

/// `CELLS[mode][range][run_enabled]`
const CELLS: [[[Cell; 2]; 2]; 3] = [
    [
        [Cell::TransientShape, Cell::Shift],
        [Cell::TransientSound, Cell::Spill],
    ],
    [
        [Cell::SustainShape, Cell::Strata],
        [Cell::SustainSound, Cell::Plume],
    ],
    [
        [Cell::CycleShape, Cell::Volley],
        [Cell::CycleSound, Cell::Floom],
    ],
];

impl Cell {
    pub const ALL: [Cell; 12] = [
        Cell::TransientShape,
        Cell::TransientSound,
        Cell::SustainShape,
        Cell::SustainSound,
        Cell::CycleShape,
        Cell::CycleSound,
        Cell::Shift,
        Cell::Spill,
        Cell::Strata,
        Cell::Plume,
        Cell::Volley,
        Cell::Floom,
    ];

    pub fn select(mode: Mode, range: Range, run_enabled: bool) -> Self {
        CELLS[mode.index()][range.index()][usize::from(run_enabled)]
    }

    pub fn mode(self) -> Mode {
        match self {
            Cell::TransientShape | Cell::TransientSound | Cell::Shift | Cell::Spill => {
                Mode::Transient
            }
            Cell::SustainShape | Cell::SustainSound | Cell::Strata | Cell::Plume => Mode::Sustain,
            Cell::CycleShape | Cell::CycleSound | Cell::Volley | Cell::Floom => Mode::Cycle,
        }
    }

    pub fn range(self) -> Range {
        match self {
            Cell::TransientShape
            | Cell::SustainShape
            | Cell::CycleShape
            | Cell::Shift
            | Cell::Strata
            | Cell::Volley => Range::Shape,
            _ => Range::Sound,
        }
    }

    pub fn run_enabled(self) -> bool {
        matches!(
            self,
            Cell::Shift | Cell::Spill | Cell::Strata | Cell::Plume | Cell::Volley | Cell::Floom
        )
    }

    /// Short name as printed on the panel.
    pub fn name(self) -> &'static str {
        match self {
            Cell::TransientShape => "transient/shape",
            Cell::TransientSound => "transient/sound",
            Cell::SustainShape => "sustain/shape",
            Cell::SustainSound => "sustain/sound",
            Cell::CycleShape => "cycle/shape",
            Cell::CycleSound => "cycle/sound",
            Cell::Shift => "shift",
            Cell::Spill => "spill",
            Cell::Strata => "strata",
            Cell::Plume => "plume",
            Cell::Volley => "volley",
            Cell::Floom => "floom",
        }
    }

    /// Advance `channel` by one sample and return its shaped output.
    #[inline]
    pub fn tick(self, channel: &mut Channel, ctx: &SampleCtx) -> f32 {
        match self {
            Cell::TransientShape | Cell::TransientSound => {
                algorithms::transient::tick(channel, ctx)
            }
            Cell::SustainShape | Cell::SustainSound => algorithms::sustain::tick(channel, ctx),
            Cell::CycleShape | Cell::CycleSound => algorithms::cycle::tick(channel, ctx),
            Cell::Shift => algorithms::shift::tick(channel, ctx),
            Cell::Spill => algorithms::spill::tick(channel, ctx),
            Cell::Strata => algorithms::strata::tick(channel, ctx),
            Cell::Plume => algorithms::plume::tick(channel, ctx),
            Cell::Volley => algorithms::volley::tick(channel, ctx),
            Cell::Floom => algorithms::floom::tick(channel, ctx),
        }
    }
}
