//! Reading types produced by the sensor port.

use serde::{Deserialize, Serialize};

/// Result of one proximity read.
///
/// A read that exceeds its bounded timeout yields [`DistanceReading::Timeout`]
/// instead of blocking; the focus detector treats it as unfocused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceReading {
    /// Measured distance to the user in centimeters
    Centimeters(u32),
    /// The echo never came back within the read timeout
    Timeout,
}

impl DistanceReading {
    /// The measured distance, or `None` on timeout.
    pub fn centimeters(self) -> Option<u32> {
        match self {
            DistanceReading::Centimeters(cm) => Some(cm),
            DistanceReading::Timeout => None,
        }
    }
}

/// One tick's ambient sample, as normalized integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSample {
    /// Temperature in °C
    pub temp: i32,
    /// Relative humidity in %
    pub humid: i32,
    /// Noise level in dB
    pub noise: i32,
}

impl EnvSample {
    pub fn new(temp: i32, humid: i32, noise: i32) -> Self {
        Self { temp, humid, noise }
    }
}

/// Physical buttons on the desk unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Starts the monitoring phase
    Start,
    /// Ends the session
    Stop,
}
