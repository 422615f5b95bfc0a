//! Frame encoding and the byte-level receiver state machine.
//!
//! The receiver consumes one byte at a time and accumulates a candidate
//! frame:
//!
//! ```text
//! Idle -> Cmd -> Length -> Data -> Checksum -> (Idle)
//! ```
//!
//! Malformed input (an oversized declared length) is discarded silently and
//! the machine resynchronizes to `Idle`; a checksum mismatch is reported
//! once so the caller can answer NACK. Exactly one frame is in flight at
//! any time: every terminal outcome re-initializes the receiver before the
//! next byte is accepted.
//!
//! Interrupt-driven and polled byte sources must both route through
//! [`FrameReceiver::push`] so the two paths cannot diverge.

use bytes::BufMut;
use log::{debug, warn};

use crate::checksum::checksum;
use crate::constants::*;
use crate::error::ProtocolError;

/// A validated frame as it came off the wire: command code plus payload.
/// The checksum has already been verified when one of these is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Command (or response) code.
    pub command: u8,
    /// Payload bytes, at most [`MAX_PAYLOAD`].
    pub payload: Vec<u8>,
}

/// Receiver state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RxState {
    /// Discarding bytes until a START marker is seen.
    #[default]
    Idle,
    /// Next byte is the command code.
    Cmd,
    /// Next byte is the declared payload length.
    Length,
    /// Accumulating payload bytes.
    Data,
    /// Next byte is the checksum.
    Checksum,
}

/// Terminal outcome of feeding a byte into the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RxEvent {
    /// A complete frame passed checksum validation.
    Frame(RawFrame),
    /// A complete frame failed checksum validation; the caller should
    /// answer NACK. The frame itself is discarded.
    ChecksumMismatch {
        /// Command code of the rejected frame.
        command: u8,
        /// Checksum computed over the received bytes.
        computed: u8,
        /// Checksum byte that arrived on the wire.
        received: u8,
    },
}

/// Incremental frame receiver.
///
/// Owns all transient reception state; no frame outlives the `push` call
/// that completes it. Multiple independent receivers may coexist (e.g. one
/// per serial port).
#[derive(Debug)]
pub struct FrameReceiver {
    state: RxState,
    command: u8,
    length: u8,
    index: usize,
    payload: [u8; MAX_PAYLOAD],
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReceiver {
    /// Create a receiver in the `Idle` state.
    pub fn new() -> Self {
        FrameReceiver {
            state: RxState::Idle,
            command: 0,
            length: 0,
            index: 0,
            payload: [0u8; MAX_PAYLOAD],
        }
    }

    /// Current state, mainly useful in tests.
    pub fn state(&self) -> RxState {
        self.state
    }

    /// Drop any partial frame and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = RxState::Idle;
        self.command = 0;
        self.length = 0;
        self.index = 0;
    }

    /// Feed one byte into the state machine.
    ///
    /// Returns `Some` only on a terminal outcome: a validated frame or a
    /// checksum mismatch. Framing corruption (declared length over
    /// [`MAX_PAYLOAD`]) yields no event; the byte stream cannot be told
    /// apart from line noise, so the receiver just resynchronizes.
    pub fn push(&mut self, byte: u8) -> Option<RxEvent> {
        match self.state {
            RxState::Idle => {
                if byte == START_BYTE {
                    self.state = RxState::Cmd;
                }
                None
            }
            RxState::Cmd => {
                self.command = byte;
                self.state = RxState::Length;
                None
            }
            RxState::Length => {
                self.length = byte;
                if usize::from(byte) > MAX_PAYLOAD {
                    debug!(
                        "declared length {} exceeds {} byte limit, resynchronizing",
                        byte, MAX_PAYLOAD
                    );
                    self.reset();
                } else if byte == 0 {
                    self.state = RxState::Checksum;
                } else {
                    self.index = 0;
                    self.state = RxState::Data;
                }
                None
            }
            RxState::Data => {
                self.payload[self.index] = byte;
                self.index += 1;
                if self.index >= usize::from(self.length) {
                    self.state = RxState::Checksum;
                }
                None
            }
            RxState::Checksum => {
                let len = usize::from(self.length);
                let computed = checksum(self.command, self.length, &self.payload[..len]);
                let event = if computed == byte {
                    RxEvent::Frame(RawFrame {
                        command: self.command,
                        payload: self.payload[..len].to_vec(),
                    })
                } else {
                    warn!(
                        "checksum mismatch on 0x{:02X}: computed 0x{:02X}, received 0x{:02X}",
                        self.command, computed, byte
                    );
                    RxEvent::ChecksumMismatch {
                        command: self.command,
                        computed,
                        received: byte,
                    }
                };
                self.reset();
                Some(event)
            }
        }
    }
}

/// Encode one frame for transmission.
///
/// Refuses payloads over [`MAX_PAYLOAD`] bytes without producing any
/// output. The result is `START, command, length, payload.., checksum,
/// END` in strict wire order.
pub fn encode_frame(command: u8, payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    if payload.len() > MAX_PAYLOAD {
        warn!(
            "refusing frame 0x{:02X}: payload {} exceeds {} byte limit",
            command,
            payload.len(),
            MAX_PAYLOAD
        );
        return Err(ProtocolError::PayloadTooLong {
            max: MAX_PAYLOAD,
            actual: payload.len(),
        });
    }

    let mut buf = Vec::with_capacity(payload.len() + FRAME_OVERHEAD);
    buf.put_u8(START_BYTE);
    buf.put_u8(command);
    buf.put_u8(payload.len() as u8);
    buf.put_slice(payload);
    buf.put_u8(checksum(command, payload.len() as u8, payload));
    buf.put_u8(END_BYTE);
    Ok(buf)
}
