use rtrb::{Consumer, Producer, PushError};
use tracing::warn;

use crate::CHANNELS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Programmatic trigger/gate request for one channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    /// Rising edge at the start of the next block.
    Trigger { index: usize },
    /// Message-sourced gate level, OR'd with the audio-rate input.
    Gate { index: usize, high: bool },
}

impl ControlMessage {
    pub fn index(&self) -> usize {
        match *self {
            ControlMessage::Trigger { index } | ControlMessage::Gate { index, .. } => index,
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Errors returned to the control thread when a message cannot be queued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankHandleError {
    /// Channel index is not 0..=5
    ChannelOutOfRange(usize),
    /// The queue is full; the bank has not drained it since the last block
    QueueFull(ControlMessage),
}

impl std::fmt::Display for BankHandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankHandleError::ChannelOutOfRange(index) => {
                write!(f, "channel {} out of range (0..{})", index, CHANNELS)
            }
            BankHandleError::QueueFull(message) => {
                write!(f, "control queue full, dropped {:?}", message)
            }
        }
    }
}

impl std::error::Error for BankHandleError {}

impl From<PushError<ControlMessage>> for BankHandleError {
    fn from(err: PushError<ControlMessage>) -> Self {
        let PushError::Full(message) = err;
        BankHandleError::QueueFull(message)
    }
}

/// Control-thread side of the bank's message queue.
pub struct BankHandle {
    tx: Producer<ControlMessage>,
}

impl BankHandle {
    pub(crate) fn new(tx: Producer<ControlMessage>) -> Self {
        Self { tx }
    }

    pub fn send(&mut self, message: ControlMessage) -> Result<(), BankHandleError> {
        if message.index() >= CHANNELS {
            warn!(index = message.index(), "ignoring control message for unknown channel");
            return Err(BankHandleError::ChannelOutOfRange(message.index()));
        }

        self.tx.push(message).map_err(|err| {
            warn!(?message, "control queue full");
            BankHandleError::from(err)
        })
    }

    /// Schedule a trigger on `index` for the next block.
    pub fn trigger(&mut self, index: usize) -> Result<(), BankHandleError> {
        self.send(ControlMessage::Trigger { index })
    }

    /// Set the message gate of `index`.
    pub fn gate(&mut self, index: usize, high: bool) -> Result<(), BankHandleError> {
        self.send(ControlMessage::Gate { index, high })
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

/// Message-sourced gate and trigger lanes, owned by the audio thread.
///
/// Messages address a channel directly and are applied after the cascade: a
/// message on channel 3 does not normal down to channels 0-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageLanes {
    gates: [bool; CHANNELS],
    pulses: [bool; CHANNELS],
}

impl MessageLanes {
    /// Fold one message in. Unknown channels are ignored.
    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Trigger { index } => {
                if let Some(pulse) = self.pulses.get_mut(index) {
                    *pulse = true;
                }
            }
            ControlMessage::Gate { index, high } => {
                if let Some(gate) = self.gates.get_mut(index) {
                    *gate = high;
                }
            }
        }
    }

    /// Drain everything currently queued.
    pub fn drain(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(message) = rx.pop() {
            self.apply(message);
        }
    }

    pub fn gate(&self, channel: usize) -> bool {
        self.gates.get(channel).copied().unwrap_or(false)
    }

    /// Pending trigger pulse for the first sample of this block.
    pub fn pulse(&self, channel: usize) -> bool {
        self.pulses.get(channel).copied().unwrap_or(false)
    }

    /// Pulses last exactly one sample.
    pub fn clear_pulses(&mut self) {
        self.pulses = [false; CHANNELS];
    }
}
