//! Device-side error types.

use thiserror::Error;

use roverlink_protocol::ProtocolError;

/// Errors that can occur while sending a frame to the transport.
#[derive(Error, Debug)]
pub enum SendError<E> {
    /// The frame could not be encoded; no bytes were written.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The transport refused a byte mid-frame.
    #[error("transport write failed")]
    Sink(E),
}
