//! Transport seams the dispatcher depends on.

use std::convert::Infallible;

/// A byte-oriented transmit sink.
///
/// The protocol assumes the sink preserves ordering and is not itself
/// lossy; a UART transmit register, a TCP socket, or an in-memory buffer
/// all qualify.
pub trait ByteSink {
    /// Error the sink can raise per byte.
    type Error;

    /// Write a single byte to the transport.
    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// In-memory sink, used by tests and loopback setups.
impl ByteSink for Vec<u8> {
    type Error = Infallible;

    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    type Error = S::Error;

    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send_byte(byte)
    }
}

/// Blocking delay provider.
///
/// The dispatcher needs this in two places: the settling gap between
/// hardware-bound sensor reads in an all-sensors exchange, and the
/// transport flush pause before a reset hands control to the watchdog.
pub trait Delay {
    /// Block for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Delay provider that returns immediately, for tests and simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// Delay provider backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
