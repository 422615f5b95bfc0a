//! Host-side session for the rover serial link.
//!
//! A [`Session`] encodes commands for transmission and incrementally
//! decodes the controller's response stream. It works with any byte
//! transport (serial port, TCP socket, in-memory loopback): hand
//! received chunks to [`Session::feed`] and drain typed responses with
//! [`Session::try_decode`].
//!
//! Retry policy stays with the caller. The controller reports a rejected
//! command with a single NACK and otherwise stays silent, so timing out
//! and re-sending (or treating the NACK as advisory) is a host decision.
//!
//! # Example
//!
//! ```rust,ignore
//! use roverlink_host::Session;
//! use roverlink_protocol::Command;
//!
//! let mut session = Session::new();
//! let wire = session.encode_command(&Command::ImuRequest)?;
//! port.write_all(&wire)?;
//!
//! session.feed(&port_bytes);
//! while let Some(response) = session.try_decode()? {
//!     println!("{response:?}");
//! }
//! ```

use bytes::{Buf, BytesMut};
use log::debug;

use roverlink_protocol::{
    encode_frame, Command, FrameReceiver, ProtocolError, Response, RxEvent,
};

/// Link traffic counters, mirrored from what the session has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Command frames encoded for transmission.
    pub frames_sent: u64,
    /// Response frames decoded successfully.
    pub frames_received: u64,
    /// Inbound frames dropped for a bad checksum.
    pub checksum_errors: u64,
}

/// Stateful host endpoint: command encoder plus incremental response
/// decoder.
#[derive(Debug, Default)]
pub struct Session {
    receiver: FrameReceiver,
    buffer: BytesMut,
    stats: LinkStats,
}

impl Session {
    /// Create an idle session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Encode a command into its wire frame.
    pub fn encode_command(&mut self, command: &Command) -> Result<Vec<u8>, ProtocolError> {
        let frame = encode_frame(command.code(), &command.encode_payload())?;
        self.stats.frames_sent += 1;
        Ok(frame)
    }

    /// Buffer received bytes for decoding.
    pub fn feed(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode the next response from the buffered bytes.
    ///
    /// Returns `Ok(Some(response))` when a complete frame was validated,
    /// `Ok(None)` when more bytes are needed. A checksum mismatch is
    /// surfaced as an error after the receiver has already resynchronized,
    /// so calling again resumes decoding behind the corrupt frame.
    pub fn try_decode(&mut self) -> Result<Option<Response>, ProtocolError> {
        while !self.buffer.is_empty() {
            let byte = self.buffer[0];
            self.buffer.advance(1);
            match self.receiver.push(byte) {
                None => continue,
                Some(RxEvent::Frame(frame)) => {
                    let response = Response::decode(frame.command, &frame.payload)?;
                    self.stats.frames_received += 1;
                    debug!("decoded {response:?}");
                    return Ok(Some(response));
                }
                Some(RxEvent::ChecksumMismatch {
                    command,
                    computed,
                    received,
                }) => {
                    self.stats.checksum_errors += 1;
                    return Err(ProtocolError::ChecksumMismatch {
                        command,
                        computed,
                        received,
                    });
                }
            }
        }
        Ok(None)
    }

    /// Drop buffered bytes and any partial frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.receiver.reset();
    }

    /// Traffic counters since the session was created.
    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roverlink_protocol::{ImuSample, RESP_IMU_DATA, RESP_NACK};

    #[test]
    fn encode_counts_frames() {
        let mut session = Session::new();
        session.encode_command(&Command::MotorStop).unwrap();
        session.encode_command(&Command::ImuRequest).unwrap();
        assert_eq!(session.stats().frames_sent, 2);
    }

    #[test]
    fn decodes_across_split_chunks() {
        let mut session = Session::new();
        let sample = ImuSample {
            gyro_z: 7.25,
            ..Default::default()
        };
        let frame = encode_frame(RESP_IMU_DATA, &sample.to_bytes()).unwrap();

        let (head, tail) = frame.split_at(10);
        session.feed(head);
        assert_eq!(session.try_decode().unwrap(), None);
        session.feed(tail);
        assert_eq!(
            session.try_decode().unwrap(),
            Some(Response::ImuData(sample))
        );
        assert_eq!(session.stats().frames_received, 1);
    }

    #[test]
    fn decodes_multiple_buffered_frames() {
        let mut session = Session::new();
        let mut wire = encode_frame(RESP_NACK, &[]).unwrap();
        wire.extend(encode_frame(RESP_NACK, &[]).unwrap());
        session.feed(&wire);

        assert_eq!(session.try_decode().unwrap(), Some(Response::Nack));
        assert_eq!(session.try_decode().unwrap(), Some(Response::Nack));
        assert_eq!(session.try_decode().unwrap(), None);
    }

    #[test]
    fn checksum_error_then_recovery() {
        let mut session = Session::new();
        let mut bad = encode_frame(RESP_NACK, &[]).unwrap();
        let checksum_pos = bad.len() - 2;
        bad[checksum_pos] ^= 0x01;
        session.feed(&bad);
        session.feed(&encode_frame(RESP_NACK, &[]).unwrap());

        assert!(matches!(
            session.try_decode(),
            Err(ProtocolError::ChecksumMismatch { .. })
        ));
        // The corrupt frame is behind us; the next one decodes cleanly.
        assert_eq!(session.try_decode().unwrap(), Some(Response::Nack));
        assert_eq!(session.stats().checksum_errors, 1);
    }

    #[test]
    fn reset_drops_partial_frame() {
        let mut session = Session::new();
        let frame = encode_frame(RESP_NACK, &[]).unwrap();
        session.feed(&frame[..3]);
        assert_eq!(session.try_decode().unwrap(), None);

        session.reset();
        session.feed(&frame);
        assert_eq!(session.try_decode().unwrap(), Some(Response::Nack));
    }
}
