//! Protocol constants
//!
//! These constants define the framing bytes, command codes, response codes,
//! and size limits of the rover serial link.

// ============================================================================
// Framing
// ============================================================================

/// Start-of-frame marker.
pub const START_BYTE: u8 = 0xAA;
/// End-of-frame marker. Emitted on send, not inspected on receive.
pub const END_BYTE: u8 = 0x55;
/// Maximum payload length a frame may declare.
pub const MAX_PAYLOAD: usize = 64;
/// Bytes a frame adds around its payload: START + COMMAND + LENGTH +
/// CHECKSUM + END.
pub const FRAME_OVERHEAD: usize = 5;

// ============================================================================
// Command Codes (host → device)
// ============================================================================

// Motor control (0x01 - 0x0F)

/// Set differential motor speed. Payload: left and right speed, one signed
/// byte each, -100..=100, positive = forward.
pub const CMD_MOTOR_SET_SPEED: u8 = 0x01;
/// Stop both motors.
pub const CMD_MOTOR_STOP: u8 = 0x02;
/// Emergency stop: halt the drivetrain and latch the fault indicator.
pub const CMD_MOTOR_EMERGENCY_STOP: u8 = 0x03;

// Sensor requests (0x10 - 0x1F)

/// Request one IMU sample.
pub const CMD_IMU_REQUEST: u8 = 0x11;
/// Request one ultrasonic range sample.
pub const CMD_ULTRASONIC_REQUEST: u8 = 0x12;
/// Request IMU and ultrasonic samples in one exchange.
pub const CMD_ALL_SENSORS_REQUEST: u8 = 0x13;

// System control (0x20 - 0x2F)

/// Switch the indicator LED. Payload: one byte, nonzero = on.
pub const CMD_LED_CONTROL: u8 = 0x20;
/// Switch the buzzer. Payload: one byte, nonzero = on.
pub const CMD_BUZZER_CONTROL: u8 = 0x21;
/// Request the system status record.
pub const CMD_SYSTEM_STATUS: u8 = 0x22;
/// Acknowledge, flush the transport, then reboot via the watchdog.
pub const CMD_RESET: u8 = 0x23;

// ============================================================================
// Response Codes (device → host)
// ============================================================================

/// Command accepted.
pub const RESP_ACK: u8 = 0xA0;
/// Command rejected: bad checksum, unknown code, or wrong payload length.
pub const RESP_NACK: u8 = 0xA1;
/// IMU telemetry record (48 bytes).
pub const RESP_IMU_DATA: u8 = 0xB1;
/// Ultrasonic telemetry record (16 bytes).
pub const RESP_ULTRASONIC_DATA: u8 = 0xB2;
/// Reserved for a combined sensor snapshot. An all-sensors request is
/// answered with separate IMU and ultrasonic frames, so this code is never
/// emitted today.
pub const RESP_ALL_SENSORS_DATA: u8 = 0xB3;
/// System status record (10 bytes).
pub const RESP_SYSTEM_STATUS: u8 = 0xB4;
