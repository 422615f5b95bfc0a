//! Commands the host sends to the rover controller.

use crate::constants::*;
use crate::error::ProtocolError;
use crate::types::MotorSpeed;

/// Commands that can be sent to the controller.
///
/// Payload arity is part of the command's contract and is enforced by
/// [`Command::decode`]: fixed-arity commands reject any other length, while
/// action and query commands ignore the payload entirely. A stop must
/// work even if line noise mangled its length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set differential motor speed (exactly 2 payload bytes).
    SetMotorSpeed {
        /// Left track speed, -100..=100, positive = forward.
        left: i8,
        /// Right track speed, -100..=100, positive = forward.
        right: i8,
    },

    /// Stop both motors.
    MotorStop,

    /// Halt the drivetrain and latch the fault indicator.
    EmergencyStop,

    /// Request one IMU sample.
    ImuRequest,

    /// Request one ultrasonic range sample.
    UltrasonicRequest,

    /// Request IMU and ultrasonic samples in one exchange.
    AllSensorsRequest,

    /// Switch the indicator LED (exactly 1 payload byte, nonzero = on).
    SetLed {
        /// Raw state byte as received.
        state: u8,
    },

    /// Switch the buzzer (exactly 1 payload byte, nonzero = on).
    SetBuzzer {
        /// Raw state byte as received.
        state: u8,
    },

    /// Request the system status record.
    SystemStatusRequest,

    /// Acknowledge, flush the transport, then reboot via the watchdog.
    Reset,
}

impl Command {
    /// Get the wire code for this command.
    pub fn code(&self) -> u8 {
        match self {
            Command::SetMotorSpeed { .. } => CMD_MOTOR_SET_SPEED,
            Command::MotorStop => CMD_MOTOR_STOP,
            Command::EmergencyStop => CMD_MOTOR_EMERGENCY_STOP,
            Command::ImuRequest => CMD_IMU_REQUEST,
            Command::UltrasonicRequest => CMD_ULTRASONIC_REQUEST,
            Command::AllSensorsRequest => CMD_ALL_SENSORS_REQUEST,
            Command::SetLed { .. } => CMD_LED_CONTROL,
            Command::SetBuzzer { .. } => CMD_BUZZER_CONTROL,
            Command::SystemStatusRequest => CMD_SYSTEM_STATUS,
            Command::Reset => CMD_RESET,
        }
    }

    /// Encode the command payload (the frame wrapper is added separately).
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Command::SetMotorSpeed { left, right } => MotorSpeed {
                left: *left,
                right: *right,
            }
            .to_bytes()
            .to_vec(),
            Command::SetLed { state } | Command::SetBuzzer { state } => vec![*state],
            Command::MotorStop
            | Command::EmergencyStop
            | Command::ImuRequest
            | Command::UltrasonicRequest
            | Command::AllSensorsRequest
            | Command::SystemStatusRequest
            | Command::Reset => Vec::new(),
        }
    }

    /// Decode a validated frame into a command, enforcing payload arity.
    pub fn decode(code: u8, payload: &[u8]) -> Result<Self, ProtocolError> {
        match code {
            CMD_MOTOR_SET_SPEED => {
                if payload.len() != MotorSpeed::WIRE_SIZE {
                    return Err(ProtocolError::WrongPayloadLength {
                        code,
                        expected: MotorSpeed::WIRE_SIZE,
                        actual: payload.len(),
                    });
                }
                let speed = MotorSpeed::from_bytes(payload)?;
                Ok(Command::SetMotorSpeed {
                    left: speed.left,
                    right: speed.right,
                })
            }
            CMD_MOTOR_STOP => Ok(Command::MotorStop),
            CMD_MOTOR_EMERGENCY_STOP => Ok(Command::EmergencyStop),
            CMD_IMU_REQUEST => Ok(Command::ImuRequest),
            CMD_ULTRASONIC_REQUEST => Ok(Command::UltrasonicRequest),
            CMD_ALL_SENSORS_REQUEST => Ok(Command::AllSensorsRequest),
            CMD_LED_CONTROL => {
                if payload.len() != 1 {
                    return Err(ProtocolError::WrongPayloadLength {
                        code,
                        expected: 1,
                        actual: payload.len(),
                    });
                }
                Ok(Command::SetLed { state: payload[0] })
            }
            CMD_BUZZER_CONTROL => {
                if payload.len() != 1 {
                    return Err(ProtocolError::WrongPayloadLength {
                        code,
                        expected: 1,
                        actual: payload.len(),
                    });
                }
                Ok(Command::SetBuzzer { state: payload[0] })
            }
            CMD_SYSTEM_STATUS => Ok(Command::SystemStatusRequest),
            CMD_RESET => Ok(Command::Reset),
            _ => Err(ProtocolError::UnknownCommand(code)),
        }
    }
}
