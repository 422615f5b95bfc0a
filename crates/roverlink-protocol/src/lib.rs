//! Rover Serial Link Protocol
//!
//! This crate provides types and utilities for the framed binary protocol
//! spoken between the rover controller and a host computer over a serial
//! channel. It is transport-agnostic: bytes go in, frames and typed
//! messages come out, and encoding produces byte vectors ready for any
//! ordering-preserving byte sink.
//!
//! # Protocol Overview
//!
//! Every message travels in a single frame:
//!
//! ```text
//! +-------+---------+--------+----------------+----------+-------+
//! | START | COMMAND | LENGTH | PAYLOAD[0..64] | CHECKSUM |  END  |
//! | 0xAA  |         |        |                |          | 0x55  |
//! +-------+---------+--------+----------------+----------+-------+
//! ```
//!
//! - **Commands** (host → device): start with a `CMD_*` code
//! - **Responses** (device → host): start with a `RESP_*` code
//!
//! The checksum is the 8-bit wrapping sum of command, length, and every
//! payload byte. The trailing END byte is emitted on send but deliberately
//! not inspected on receive; the declared LENGTH is authoritative.
//!
//! # Example
//!
//! ```rust,ignore
//! use roverlink_protocol::{Command, FrameReceiver, RxEvent, encode_frame};
//!
//! // Build a command frame
//! let cmd = Command::SetMotorSpeed { left: 50, right: -50 };
//! let frame = encode_frame(cmd.code(), &cmd.encode_payload())?;
//!
//! // Feed received bytes one at a time
//! let mut rx = FrameReceiver::new();
//! for byte in frame {
//!     if let Some(RxEvent::Frame(raw)) = rx.push(byte) {
//!         let decoded = Command::decode(raw.command, &raw.payload)?;
//!     }
//! }
//! ```

mod checksum;
mod commands;
mod constants;
mod error;
mod frame;
mod responses;
mod types;

pub use checksum::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use responses::*;
pub use types::*;
