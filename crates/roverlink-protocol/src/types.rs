//! Typed payload records carried by specific frames.
//!
//! All records are fixed-layout, little-endian, with IEEE-754 floats,
//! matching what the host unpacks byte-for-byte. `from_bytes` tolerates
//! trailing bytes and reads only the record's wire size.

use crate::error::ProtocolError;

/// Differential motor speed command payload (2 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorSpeed {
    /// Left track speed, -100..=100, positive = forward.
    pub left: i8,
    /// Right track speed, -100..=100, positive = forward.
    pub right: i8,
}

impl MotorSpeed {
    /// Encoded size on the wire.
    pub const WIRE_SIZE: usize = 2;

    /// Build a speed command, saturating both sides into -100..=100.
    pub fn clamped(left: i16, right: i16) -> Self {
        MotorSpeed {
            left: left.clamp(-100, 100) as i8,
            right: right.clamp(-100, 100) as i8,
        }
    }

    /// Serialize to wire layout.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        [self.left as u8, self.right as u8]
    }

    /// Read from wire layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        check_len(bytes, Self::WIRE_SIZE)?;
        Ok(MotorSpeed {
            left: bytes[0] as i8,
            right: bytes[1] as i8,
        })
    }
}

/// One 9-DOF IMU sample plus derived orientation (48 bytes, 12 floats).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImuSample {
    /// Acceleration, m/s².
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,
    /// Angular rate, deg/s.
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
    /// Magnetic field, µT.
    pub mag_x: f32,
    pub mag_y: f32,
    pub mag_z: f32,
    /// Orientation, degrees.
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl ImuSample {
    /// Encoded size on the wire.
    pub const WIRE_SIZE: usize = 48;

    /// Serialize to wire layout.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buf = [0u8; Self::WIRE_SIZE];
        let fields = [
            self.accel_x,
            self.accel_y,
            self.accel_z,
            self.gyro_x,
            self.gyro_y,
            self.gyro_z,
            self.mag_x,
            self.mag_y,
            self.mag_z,
            self.roll,
            self.pitch,
            self.yaw,
        ];
        for (chunk, value) in buf.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        buf
    }

    /// Read from wire layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        check_len(bytes, Self::WIRE_SIZE)?;
        Ok(ImuSample {
            accel_x: f32_at(bytes, 0),
            accel_y: f32_at(bytes, 4),
            accel_z: f32_at(bytes, 8),
            gyro_x: f32_at(bytes, 12),
            gyro_y: f32_at(bytes, 16),
            gyro_z: f32_at(bytes, 20),
            mag_x: f32_at(bytes, 24),
            mag_y: f32_at(bytes, 28),
            mag_z: f32_at(bytes, 32),
            roll: f32_at(bytes, 36),
            pitch: f32_at(bytes, 40),
            yaw: f32_at(bytes, 44),
        })
    }
}

/// Ranges from the four ultrasonic sensors, cm (16 bytes, 4 floats).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UltrasonicSample {
    pub front: f32,
    pub rear: f32,
    pub left: f32,
    pub right: f32,
}

impl UltrasonicSample {
    /// Encoded size on the wire.
    pub const WIRE_SIZE: usize = 16;

    /// Sentinel range reported when no echo returned within the sensor
    /// timeout.
    pub const NO_ECHO_CM: f32 = 400.0;

    /// Reserved upstream for a reading the sensor driver flagged invalid.
    pub const INVALID_CM: f32 = -1.0;

    /// Serialize to wire layout.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buf = [0u8; Self::WIRE_SIZE];
        let fields = [self.front, self.rear, self.left, self.right];
        for (chunk, value) in buf.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        buf
    }

    /// Read from wire layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        check_len(bytes, Self::WIRE_SIZE)?;
        Ok(UltrasonicSample {
            front: f32_at(bytes, 0),
            rear: f32_at(bytes, 4),
            left: f32_at(bytes, 8),
            right: f32_at(bytes, 12),
        })
    }
}

/// Controller health snapshot (10 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemStatus {
    /// Seconds since boot.
    pub uptime_secs: u32,
    /// Battery voltage, volts.
    pub battery_voltage: f32,
    /// CPU load percentage, 0-100.
    pub cpu_load: u8,
    /// Errors counted since boot.
    pub error_count: u8,
}

impl SystemStatus {
    /// Encoded size on the wire.
    pub const WIRE_SIZE: usize = 10;

    /// Serialize to wire layout.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buf = [0u8; Self::WIRE_SIZE];
        buf[0..4].copy_from_slice(&self.uptime_secs.to_le_bytes());
        buf[4..8].copy_from_slice(&self.battery_voltage.to_le_bytes());
        buf[8] = self.cpu_load;
        buf[9] = self.error_count;
        buf
    }

    /// Read from wire layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        check_len(bytes, Self::WIRE_SIZE)?;
        Ok(SystemStatus {
            uptime_secs: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            battery_voltage: f32_at(bytes, 4),
            cpu_load: bytes[8],
            error_count: bytes[9],
        })
    }
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if bytes.len() < expected {
        Err(ProtocolError::Truncated {
            expected,
            actual: bytes.len(),
        })
    } else {
        Ok(())
    }
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
