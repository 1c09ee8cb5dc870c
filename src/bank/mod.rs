//! The stateful generator: six channels, the mode matrix and the control queue.

/// Per-sample algorithms for each cell of the mode matrix.
pub mod algorithms;
/// Trigger input normalling.
pub mod cascade;
/// Per-channel state and gate edge detection.
pub mod channel;
/// Cross-thread trigger and gate messages.
pub mod message;
/// Mode, range and the twelve-cell dispatch table.
pub mod mode;
/// Configuration, parameter snapshots and descriptors.
pub mod params;
mod slope_bank;

pub use cascade::CascadeMap;
pub use channel::{Channel, SlopeState};
pub use message::{BankHandle, BankHandleError, ControlMessage, MessageReceiver};
pub use mode::{Cell, Mode, Range};
pub use params::{BankConfig, BlockParams, ParamDescriptor, ParamRate, Params, PARAM_DESCRIPTORS};
pub use slope_bank::SlopeBank;
