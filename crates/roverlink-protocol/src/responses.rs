//! Responses the rover controller sends to the host.

use crate::constants::*;
use crate::error::ProtocolError;
use crate::types::{ImuSample, SystemStatus, UltrasonicSample};

/// Responses received from the controller.
///
/// ACK and NACK are zero-payload frames; the telemetry variants carry one
/// fixed-layout record each. An all-sensors request is answered with an
/// [`Response::ImuData`] frame followed by an [`Response::UltrasonicData`]
/// frame rather than a combined record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    /// Command accepted.
    Ack,

    /// Command rejected: bad checksum, unknown code, or wrong payload
    /// length.
    Nack,

    /// IMU telemetry.
    ImuData(ImuSample),

    /// Ultrasonic telemetry.
    UltrasonicData(UltrasonicSample),

    /// Controller health snapshot.
    SystemStatus(SystemStatus),
}

impl Response {
    /// Get the wire code for this response.
    pub fn code(&self) -> u8 {
        match self {
            Response::Ack => RESP_ACK,
            Response::Nack => RESP_NACK,
            Response::ImuData(_) => RESP_IMU_DATA,
            Response::UltrasonicData(_) => RESP_ULTRASONIC_DATA,
            Response::SystemStatus(_) => RESP_SYSTEM_STATUS,
        }
    }

    /// Encode the response payload (the frame wrapper is added separately).
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Response::Ack | Response::Nack => Vec::new(),
            Response::ImuData(sample) => sample.to_bytes().to_vec(),
            Response::UltrasonicData(sample) => sample.to_bytes().to_vec(),
            Response::SystemStatus(status) => status.to_bytes().to_vec(),
        }
    }

    /// Decode a validated frame into a response.
    ///
    /// ACK/NACK tolerate stray payload bytes; the telemetry records require
    /// their exact wire size.
    pub fn decode(code: u8, payload: &[u8]) -> Result<Self, ProtocolError> {
        match code {
            RESP_ACK => Ok(Response::Ack),
            RESP_NACK => Ok(Response::Nack),
            RESP_IMU_DATA => {
                check_record_len(code, payload, ImuSample::WIRE_SIZE)?;
                Ok(Response::ImuData(ImuSample::from_bytes(payload)?))
            }
            RESP_ULTRASONIC_DATA => {
                check_record_len(code, payload, UltrasonicSample::WIRE_SIZE)?;
                Ok(Response::UltrasonicData(UltrasonicSample::from_bytes(
                    payload,
                )?))
            }
            RESP_SYSTEM_STATUS => {
                check_record_len(code, payload, SystemStatus::WIRE_SIZE)?;
                Ok(Response::SystemStatus(SystemStatus::from_bytes(payload)?))
            }
            _ => Err(ProtocolError::UnknownResponse(code)),
        }
    }
}

fn check_record_len(code: u8, payload: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if payload.len() != expected {
        Err(ProtocolError::WrongPayloadLength {
            code,
            expected,
            actual: payload.len(),
        })
    } else {
        Ok(())
    }
}
