//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when encoding or decoding link frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload exceeds the frame size limit; nothing was encoded.
    #[error("payload too long: maximum {max} bytes, got {actual}")]
    PayloadTooLong {
        /// Maximum allowed payload length.
        max: usize,
        /// Actual payload length requested.
        actual: usize,
    },

    /// Unknown command code.
    #[error("unknown command code: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Unknown response code.
    #[error("unknown response code: 0x{0:02X}")]
    UnknownResponse(u8),

    /// A known code arrived with a payload of the wrong length.
    #[error("wrong payload length for 0x{code:02X}: expected {expected} bytes, got {actual}")]
    WrongPayloadLength {
        /// Command or response code the payload belongs to.
        code: u8,
        /// Length the code requires.
        expected: usize,
        /// Length actually received.
        actual: usize,
    },

    /// A typed record could not be read from a short buffer.
    #[error("record truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the record layout requires.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Received checksum byte does not match the computed one.
    #[error(
        "checksum mismatch on 0x{command:02X}: computed 0x{computed:02X}, received 0x{received:02X}"
    )]
    ChecksumMismatch {
        /// Command code of the rejected frame.
        command: u8,
        /// Checksum computed over the received bytes.
        computed: u8,
        /// Checksum byte that arrived on the wire.
        received: u8,
    },
}
