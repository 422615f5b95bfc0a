//! Example: Drive a simulated rover through an in-memory loopback.
//!
//! Usage: cargo run --example loopback

use roverlink_device::{Dispatcher, Handlers, NoDelay};
use roverlink_host::Session;
use roverlink_protocol::{Command, ImuSample, SystemStatus, UltrasonicSample};

/// Simulated rover: prints what it is told to do and serves canned
/// telemetry.
struct SimRover {
    uptime_secs: u32,
}

impl Handlers for SimRover {
    fn set_motor_speed(&mut self, left: i8, right: i8) {
        println!("  [rover] motors set to left={left} right={right}");
    }

    fn motor_stop(&mut self) {
        println!("  [rover] motors stopped");
    }

    fn emergency_stop(&mut self) {
        println!("  [rover] EMERGENCY STOP");
    }

    fn imu_sample(&mut self) -> ImuSample {
        ImuSample {
            accel_z: -9.81,
            roll: 1.2,
            pitch: -0.4,
            yaw: 93.0,
            ..Default::default()
        }
    }

    fn ultrasonic_sample(&mut self) -> UltrasonicSample {
        UltrasonicSample {
            front: 57.5,
            rear: 120.0,
            left: 34.25,
            right: UltrasonicSample::NO_ECHO_CM,
        }
    }

    fn system_status(&mut self) -> SystemStatus {
        SystemStatus {
            uptime_secs: self.uptime_secs,
            battery_voltage: 12.4,
            cpu_load: 17,
            error_count: 0,
        }
    }

    fn set_led(&mut self, state: u8) {
        println!("  [rover] LED {}", if state != 0 { "on" } else { "off" });
    }

    fn set_buzzer(&mut self, state: u8) {
        println!("  [rover] buzzer {}", if state != 0 { "on" } else { "off" });
    }

    fn reset(&mut self) {
        println!("  [rover] rebooting via watchdog");
    }
}

fn main() {
    let mut session = Session::new();
    let mut engine = Dispatcher::new(SimRover { uptime_secs: 41 }, Vec::new(), NoDelay);

    let script = [
        Command::SetMotorSpeed {
            left: 70,
            right: 70,
        },
        Command::SetLed { state: 1 },
        Command::ImuRequest,
        Command::AllSensorsRequest,
        Command::SystemStatusRequest,
        Command::MotorStop,
    ];

    for command in &script {
        println!("host -> {command:?}");
        let wire = session.encode_command(command).expect("command encodes");
        engine.feed(&wire).expect("in-memory sink cannot fail");

        let device_tx = std::mem::take(engine.sink_mut());
        session.feed(&device_tx);
        while let Some(response) = session.try_decode().expect("clean loopback wire") {
            println!("host <- {response:?}");
        }
    }

    let stats = session.stats();
    println!(
        "\nlink stats: {} sent, {} received, {} checksum errors",
        stats.frames_sent, stats.frames_received, stats.checksum_errors
    );
}
