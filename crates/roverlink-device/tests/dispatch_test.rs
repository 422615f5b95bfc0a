//! Integration tests for the device-side dispatch engine.
//!
//! These drive the dispatcher with raw wire bytes and assert byte-exact
//! responses, standing in for a host on the other end of the serial link.

use roverlink_device::{Delay, Dispatcher, Handlers, SENSOR_SETTLE_MS};
use roverlink_protocol::{
    encode_frame, FrameReceiver, ImuSample, Response, RxEvent, SystemStatus, UltrasonicSample,
    CMD_ALL_SENSORS_REQUEST, CMD_IMU_REQUEST, CMD_LED_CONTROL, CMD_MOTOR_SET_SPEED,
    CMD_MOTOR_STOP, CMD_RESET, CMD_SYSTEM_STATUS,
};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Test doubles
// ============================================================================

/// Everything the handlers were asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetMotorSpeed(i8, i8),
    MotorStop,
    EmergencyStop,
    ImuSample,
    UltrasonicSample,
    SystemStatus,
    SetLed(u8),
    SetBuzzer(u8),
    Reset,
    DelayMs(u32),
}

/// Shared call log so the handler set and the delay provider can interleave
/// their entries.
type CallLog = Rc<RefCell<Vec<Call>>>;

struct RecordingHandlers {
    calls: CallLog,
    imu: ImuSample,
    ultrasonic: UltrasonicSample,
    status: SystemStatus,
}

impl RecordingHandlers {
    fn new(calls: CallLog) -> Self {
        RecordingHandlers {
            calls,
            imu: ImuSample {
                accel_z: -9.81,
                yaw: 45.0,
                ..Default::default()
            },
            ultrasonic: UltrasonicSample {
                front: 30.5,
                rear: UltrasonicSample::NO_ECHO_CM,
                left: 12.0,
                right: 88.25,
            },
            status: SystemStatus {
                uptime_secs: 77,
                battery_voltage: 12.0,
                cpu_load: 50,
                error_count: 0,
            },
        }
    }
}

impl Handlers for RecordingHandlers {
    fn set_motor_speed(&mut self, left: i8, right: i8) {
        self.calls.borrow_mut().push(Call::SetMotorSpeed(left, right));
    }

    fn motor_stop(&mut self) {
        self.calls.borrow_mut().push(Call::MotorStop);
    }

    fn emergency_stop(&mut self) {
        self.calls.borrow_mut().push(Call::EmergencyStop);
    }

    fn imu_sample(&mut self) -> ImuSample {
        self.calls.borrow_mut().push(Call::ImuSample);
        self.imu
    }

    fn ultrasonic_sample(&mut self) -> UltrasonicSample {
        self.calls.borrow_mut().push(Call::UltrasonicSample);
        self.ultrasonic
    }

    fn system_status(&mut self) -> SystemStatus {
        self.calls.borrow_mut().push(Call::SystemStatus);
        self.status
    }

    fn set_led(&mut self, state: u8) {
        self.calls.borrow_mut().push(Call::SetLed(state));
    }

    fn set_buzzer(&mut self, state: u8) {
        self.calls.borrow_mut().push(Call::SetBuzzer(state));
    }

    fn reset(&mut self) {
        self.calls.borrow_mut().push(Call::Reset);
    }
}

struct RecordingDelay {
    calls: CallLog,
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.borrow_mut().push(Call::DelayMs(ms));
    }
}

fn engine() -> (Dispatcher<RecordingHandlers, Vec<u8>, RecordingDelay>, CallLog) {
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let handlers = RecordingHandlers::new(calls.clone());
    let delay = RecordingDelay {
        calls: calls.clone(),
    };
    (Dispatcher::new(handlers, Vec::new(), delay), calls)
}

/// Decode every complete frame in the sink into typed responses.
fn decode_responses(wire: &[u8]) -> Vec<Response> {
    let mut rx = FrameReceiver::new();
    wire.iter()
        .filter_map(|b| match rx.push(*b) {
            Some(RxEvent::Frame(frame)) => {
                Some(Response::decode(frame.command, &frame.payload).expect("valid response"))
            }
            Some(RxEvent::ChecksumMismatch { .. }) => panic!("device sent a corrupt frame"),
            None => None,
        })
        .collect()
}

// ============================================================================
// Byte-exact scenarios
// ============================================================================

#[test]
fn motor_stop_invokes_handler_and_acks() {
    let (mut engine, calls) = engine();

    engine.feed(&[0xAA, 0x02, 0x00, 0x02, 0x55]).unwrap();

    assert_eq!(*calls.borrow(), vec![Call::MotorStop]);
    let (_, wire) = engine.into_parts();
    assert_eq!(wire, vec![0xAA, 0xA0, 0x00, 0xA0, 0x55]);
}

#[test]
fn motor_set_speed_wire_format() {
    let (mut engine, calls) = engine();

    // checksum: (0x01 + 0x02 + 50 + (256 - 50)) mod 256 = 0x03
    let frame = encode_frame(CMD_MOTOR_SET_SPEED, &[50, 206]).unwrap();
    assert_eq!(frame, vec![0xAA, 0x01, 0x02, 50, 206, 0x03, 0x55]);
    engine.feed(&frame).unwrap();

    assert_eq!(*calls.borrow(), vec![Call::SetMotorSpeed(50, -50)]);
    let (_, wire) = engine.into_parts();
    assert_eq!(decode_responses(&wire), vec![Response::Ack]);
}

#[test]
fn unknown_command_yields_nack_without_handler_call() {
    let (mut engine, calls) = engine();

    // 0xFF with zero length is well-formed (checksum 0xFF) but unmapped.
    engine.feed(&[0xAA, 0xFF, 0x00, 0xFF, 0x55]).unwrap();

    assert!(calls.borrow().is_empty());
    let (_, wire) = engine.into_parts();
    assert_eq!(decode_responses(&wire), vec![Response::Nack]);
}

#[test]
fn checksum_mismatch_yields_exactly_one_nack() {
    let (mut engine, calls) = engine();

    engine.feed(&[0xAA, 0x02, 0x00, 0x99, 0x55]).unwrap();

    assert!(calls.borrow().is_empty());
    let (_, wire) = engine.into_parts();
    assert_eq!(decode_responses(&wire), vec![Response::Nack]);
}

#[test]
fn oversized_length_is_discarded_silently() {
    let (mut engine, calls) = engine();

    engine.feed(&[0xAA, 0x02, 65]).unwrap();

    assert!(calls.borrow().is_empty());
    let (_, wire) = engine.into_parts();
    assert!(wire.is_empty());
}

#[test]
fn wrong_arity_yields_nack_without_side_effect() {
    let (mut engine, calls) = engine();

    // Motor set-speed with a single payload byte.
    let frame = encode_frame(CMD_MOTOR_SET_SPEED, &[50]).unwrap();
    engine.feed(&frame).unwrap();
    // LED control with two payload bytes.
    let frame = encode_frame(CMD_LED_CONTROL, &[1, 1]).unwrap();
    engine.feed(&frame).unwrap();

    assert!(calls.borrow().is_empty());
    let (_, wire) = engine.into_parts();
    assert_eq!(decode_responses(&wire), vec![Response::Nack, Response::Nack]);
}

// ============================================================================
// Queries and composite dispatch
// ============================================================================

#[test]
fn imu_query_sends_data_frame_not_ack() {
    let (mut engine, calls) = engine();

    let frame = encode_frame(CMD_IMU_REQUEST, &[]).unwrap();
    engine.feed(&frame).unwrap();

    assert_eq!(*calls.borrow(), vec![Call::ImuSample]);
    let (handlers, wire) = engine.into_parts();
    assert_eq!(
        decode_responses(&wire),
        vec![Response::ImuData(handlers.imu)]
    );
}

#[test]
fn system_status_query_round_trips() {
    let (mut engine, _) = engine();

    let frame = encode_frame(CMD_SYSTEM_STATUS, &[]).unwrap();
    engine.feed(&frame).unwrap();

    let (handlers, wire) = engine.into_parts();
    assert_eq!(
        decode_responses(&wire),
        vec![Response::SystemStatus(handlers.status)]
    );
}

#[test]
fn all_sensors_preserves_sequence_and_settling_gap() {
    let (mut engine, calls) = engine();

    let frame = encode_frame(CMD_ALL_SENSORS_REQUEST, &[]).unwrap();
    engine.feed(&frame).unwrap();

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::ImuSample,
            Call::DelayMs(SENSOR_SETTLE_MS),
            Call::UltrasonicSample,
        ]
    );
    let (handlers, wire) = engine.into_parts();
    assert_eq!(
        decode_responses(&wire),
        vec![
            Response::ImuData(handlers.imu),
            Response::UltrasonicData(handlers.ultrasonic),
        ]
    );
}

#[test]
fn reset_acks_flushes_then_hands_off() {
    let (mut engine, calls) = engine();

    let frame = encode_frame(CMD_RESET, &[]).unwrap();
    engine.feed(&frame).unwrap();

    // ACK is on the wire before the handler sees the reset.
    assert_eq!(*calls.borrow(), vec![Call::DelayMs(100), Call::Reset]);
    let (_, wire) = engine.into_parts();
    assert_eq!(decode_responses(&wire), vec![Response::Ack]);
}

// ============================================================================
// Stream behavior
// ============================================================================

#[test]
fn back_to_back_frames_in_one_feed() {
    let (mut engine, calls) = engine();

    let mut stream = encode_frame(CMD_MOTOR_STOP, &[]).unwrap();
    stream.extend(encode_frame(CMD_MOTOR_SET_SPEED, &[10, 20]).unwrap());
    engine.feed(&stream).unwrap();

    assert_eq!(
        *calls.borrow(),
        vec![Call::MotorStop, Call::SetMotorSpeed(10, 20)]
    );
    let (_, wire) = engine.into_parts();
    assert_eq!(decode_responses(&wire), vec![Response::Ack, Response::Ack]);
}

#[test]
fn noise_between_frames_is_ignored() {
    let (mut engine, calls) = engine();

    let mut stream = vec![0x00, 0x55, 0x13];
    stream.extend(encode_frame(CMD_MOTOR_STOP, &[]).unwrap());
    stream.extend([0x7F, 0x00]);
    stream.extend(encode_frame(CMD_LED_CONTROL, &[1]).unwrap());
    engine.feed(&stream).unwrap();

    assert_eq!(*calls.borrow(), vec![Call::MotorStop, Call::SetLed(1)]);
}

#[test]
fn byte_at_a_time_matches_bulk_feed() {
    // Interrupt-style delivery (one byte per call) and a polled bulk feed
    // must produce identical behavior.
    let stream = {
        let mut s = encode_frame(CMD_MOTOR_SET_SPEED, &[5, 251]).unwrap();
        s.extend(encode_frame(CMD_IMU_REQUEST, &[]).unwrap());
        s
    };

    let (mut bulk, bulk_calls) = engine();
    bulk.feed(&stream).unwrap();

    let (mut single, single_calls) = engine();
    for byte in &stream {
        single.feed_byte(*byte).unwrap();
    }

    assert_eq!(*bulk_calls.borrow(), *single_calls.borrow());
    let (_, bulk_wire) = bulk.into_parts();
    let (_, single_wire) = single.into_parts();
    assert_eq!(bulk_wire, single_wire);
}
