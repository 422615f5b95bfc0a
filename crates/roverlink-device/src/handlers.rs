//! The handler surface the surrounding firmware supplies.

use roverlink_protocol::{ImuSample, SystemStatus, UltrasonicSample};

/// Operations the dispatcher invokes to act on the hardware.
///
/// All methods are synchronous: the dispatcher blocks until a handler
/// returns, and nothing else runs in the meantime. Handlers must not feed
/// bytes back into the receiver. Query handlers return the typed record
/// and the dispatcher takes care of encoding and sending the data frame.
pub trait Handlers {
    /// Apply a differential speed to the drivetrain. Speeds are
    /// -100..=100, positive = forward.
    fn set_motor_speed(&mut self, left: i8, right: i8);

    /// Stop both motors.
    fn motor_stop(&mut self);

    /// Halt the drivetrain and latch the fault indicator.
    fn emergency_stop(&mut self);

    /// Read one IMU sample. May block on the sensor bus.
    fn imu_sample(&mut self) -> ImuSample;

    /// Read one ultrasonic range sample. May block for the full echo
    /// timeout per sensor.
    fn ultrasonic_sample(&mut self) -> UltrasonicSample;

    /// Snapshot the controller's health counters.
    fn system_status(&mut self) -> SystemStatus;

    /// Switch the indicator LED; nonzero = on.
    fn set_led(&mut self, state: u8);

    /// Switch the buzzer; nonzero = on.
    fn set_buzzer(&mut self, state: u8);

    /// Hand control to the watchdog/reboot mechanism. On real hardware
    /// this never returns; test doubles may return to let the dispatcher
    /// unwind.
    fn reset(&mut self);
}
