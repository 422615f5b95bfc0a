//! Outbound frame serialization.

use roverlink_protocol::{encode_frame, Response};

use crate::error::SendError;
use crate::transport::ByteSink;

/// Serializes frames and writes them byte-by-byte to the transport sink.
#[derive(Debug)]
pub struct FrameSender<S> {
    sink: S,
}

impl<S: ByteSink> FrameSender<S> {
    /// Wrap a sink.
    pub fn new(sink: S) -> Self {
        FrameSender { sink }
    }

    /// Access the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the sender and return the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Encode and send one frame.
    ///
    /// Refuses oversized payloads before any byte reaches the wire, so a
    /// failed send never leaves a half-written frame behind.
    pub fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), SendError<S::Error>> {
        let frame = encode_frame(command, payload)?;
        for byte in frame {
            self.sink.send_byte(byte).map_err(SendError::Sink)?;
        }
        Ok(())
    }

    /// Encode and send a typed response.
    pub fn send_response(&mut self, response: &Response) -> Result<(), SendError<S::Error>> {
        self.send(response.code(), &response.encode_payload())
    }
}
