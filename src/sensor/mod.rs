//! Sensor port abstraction for Study Sentinel.
//!
//! The real desk hardware (ultrasonic ranger, temperature/humidity/sound ADC
//! channels, buttons, LED, buzzer) sits behind the [`SensorPort`] trait. The
//! crate ships a channel-fed [`SimulatedPort`] so the monitor runs and tests
//! without the physical bus.

pub mod sim;
pub mod types;

// Re-export commonly used types
pub use sim::{SimulatedHandle, SimulatedPort};
pub use types::{Button, DistanceReading, EnvSample};

/// Contract with the desk hardware.
///
/// Reads are blocking with bounded timeouts; a distance read that times out
/// must return [`DistanceReading::Timeout`] rather than block indefinitely.
/// Button reads are debounced edge detections: `true` at most once per press.
pub trait SensorPort {
    /// Read the proximity sensor.
    fn read_distance(&mut self) -> DistanceReading;

    /// Read temperature, humidity, and noise as normalized integers.
    fn read_environment(&mut self) -> EnvSample;

    /// Poll a button for a press edge since the previous poll.
    fn read_button(&mut self, button: Button) -> bool;

    /// Drive the session indicator (LED).
    fn set_indicator(&mut self, on: bool);

    /// Drive the alarm output (buzzer).
    fn set_alarm(&mut self, on: bool);
}
