//! Command dispatch.
//!
//! Ties the receive state machine to the handler surface: every byte fed
//! in runs through the [`FrameReceiver`], and a completed frame is
//! validated, dispatched, and answered before `feed_byte` returns.

use log::{debug, warn};

use roverlink_protocol::{Command, FrameReceiver, RawFrame, Response, RxEvent};

use crate::error::SendError;
use crate::handlers::Handlers;
use crate::sender::FrameSender;
use crate::transport::{ByteSink, Delay};

/// Settling gap between the IMU read and the ultrasonic read of an
/// all-sensors exchange. Echo-based ranging needs the bus idle between
/// trigger pulses.
pub const SENSOR_SETTLE_MS: u32 = 10;

/// Pause after acknowledging a reset so the transport can flush the ACK
/// before the watchdog fires.
pub const RESET_FLUSH_MS: u32 = 100;

/// Device-side protocol engine.
///
/// Both legitimate byte sources, a receive interrupt delivering one byte
/// per event or a polling loop draining a FIFO, must call
/// [`Dispatcher::feed_byte`] so they share the identical transition
/// function.
#[derive(Debug)]
pub struct Dispatcher<H, S, D> {
    receiver: FrameReceiver,
    handlers: H,
    sender: FrameSender<S>,
    delay: D,
}

impl<H, S, D> Dispatcher<H, S, D>
where
    H: Handlers,
    S: ByteSink,
    D: Delay,
{
    /// Build an engine around the injected handler set, transmit sink,
    /// and delay provider.
    pub fn new(handlers: H, sink: S, delay: D) -> Self {
        Dispatcher {
            receiver: FrameReceiver::new(),
            handlers,
            sender: FrameSender::new(sink),
            delay,
        }
    }

    /// Access the handler set.
    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    /// Mutable access to the handler set.
    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }

    /// Access the transmit sink, e.g. to drain a loopback buffer.
    pub fn sink_mut(&mut self) -> &mut S {
        self.sender.sink_mut()
    }

    /// Consume the engine and return the handler set and sink.
    pub fn into_parts(self) -> (H, S) {
        (self.handlers, self.sender.into_inner())
    }

    /// Feed one byte from the transport.
    ///
    /// If the byte completes a frame, validation and dispatch run
    /// synchronously inside this call; any response is fully written to
    /// the sink before it returns.
    pub fn feed_byte(&mut self, byte: u8) -> Result<(), SendError<S::Error>> {
        match self.receiver.push(byte) {
            None => Ok(()),
            Some(RxEvent::ChecksumMismatch { .. }) => self.sender.send_response(&Response::Nack),
            Some(RxEvent::Frame(frame)) => self.dispatch(frame),
        }
    }

    /// Feed a run of bytes, e.g. a drained FIFO.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), SendError<S::Error>> {
        for byte in bytes {
            self.feed_byte(*byte)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, frame: RawFrame) -> Result<(), SendError<S::Error>> {
        let command = match Command::decode(frame.command, &frame.payload) {
            Ok(command) => command,
            Err(err) => {
                warn!("rejecting frame: {err}");
                return self.sender.send_response(&Response::Nack);
            }
        };
        debug!("dispatching {command:?}");

        match command {
            Command::SetMotorSpeed { left, right } => {
                self.handlers.set_motor_speed(left, right);
                self.sender.send_response(&Response::Ack)
            }
            Command::MotorStop => {
                self.handlers.motor_stop();
                self.sender.send_response(&Response::Ack)
            }
            Command::EmergencyStop => {
                self.handlers.emergency_stop();
                self.sender.send_response(&Response::Ack)
            }
            Command::ImuRequest => {
                let sample = self.handlers.imu_sample();
                self.sender.send_response(&Response::ImuData(sample))
            }
            Command::UltrasonicRequest => {
                let sample = self.handlers.ultrasonic_sample();
                self.sender.send_response(&Response::UltrasonicData(sample))
            }
            Command::AllSensorsRequest => {
                // Fixed sequence with a mandatory settling gap; the order
                // is part of the contract with the sensor collaborator.
                let imu = self.handlers.imu_sample();
                self.sender.send_response(&Response::ImuData(imu))?;
                self.delay.delay_ms(SENSOR_SETTLE_MS);
                let ranges = self.handlers.ultrasonic_sample();
                self.sender.send_response(&Response::UltrasonicData(ranges))
            }
            Command::SystemStatusRequest => {
                let status = self.handlers.system_status();
                self.sender.send_response(&Response::SystemStatus(status))
            }
            Command::SetLed { state } => {
                self.handlers.set_led(state);
                self.sender.send_response(&Response::Ack)
            }
            Command::SetBuzzer { state } => {
                self.handlers.set_buzzer(state);
                self.sender.send_response(&Response::Ack)
            }
            Command::Reset => {
                // Acknowledge first, give the transport time to flush,
                // then hand off. On real hardware reset() never returns.
                self.sender.send_response(&Response::Ack)?;
                self.delay.delay_ms(RESET_FLUSH_MS);
                self.handlers.reset();
                Ok(())
            }
        }
    }
}
