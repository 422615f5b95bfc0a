//! Frame checksum.

/// Compute the frame checksum: the 8-bit wrapping sum of the command code,
/// the declared length, and every payload byte.
///
/// The same function is used to validate inbound frames and to construct
/// outbound ones; the two directions must never diverge.
pub fn checksum(command: u8, length: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(command.wrapping_add(length), |sum, b| sum.wrapping_add(*b))
}
