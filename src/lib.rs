pub mod bank; // Six-channel generator, mode matrix, control queue
pub mod dsp; // Stateless shaping, frequency and mix primitives
pub mod io; // Host stream layout

pub use bank::{
    BankConfig, BankHandle, BankHandleError, BlockParams, Cell, ControlMessage, Mode, Params, Range,
    SlopeBank,
};
pub use io::{OutputBuffers, SignalInputs, SignalOutputs};

/// Number of generator channels. Channel 0 is IDENTITY.
pub const CHANNELS: usize = 6;
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Frequency floor in Hz, keeps every phase increment positive.
pub const MIN_FREQUENCY: f32 = 0.001;
