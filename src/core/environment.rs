//! Ambient environment accumulation and threshold checks.

use crate::config::Thresholds;
use crate::sensor::EnvSample;
use serde::{Deserialize, Serialize};

/// Which environmental thresholds a sample breached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvBreach {
    pub temp: bool,
    pub humid: bool,
    pub noise: bool,
}

impl EnvBreach {
    pub fn any(&self) -> bool {
        self.temp || self.humid || self.noise
    }

    /// Free-text description for the notification channels.
    pub fn describe(&self, sample: &EnvSample) -> String {
        let mut parts = Vec::new();
        if self.temp {
            parts.push(format!("temperature {}C", sample.temp));
        }
        if self.humid {
            parts.push(format!("humidity {}%", sample.humid));
        }
        if self.noise {
            parts.push(format!("noise {}dB", sample.noise));
        }
        format!("environment alert: {}", parts.join(", "))
    }
}

/// Session averages of the accumulated environment samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvAverages {
    pub temp: f64,
    pub humid: f64,
    pub noise: f64,
}

/// Accumulates environment samples over a session.
///
/// Keeps running sums for end-of-session averaging and evaluates each
/// incoming sample against the configured thresholds. Owned by the active
/// session; each new session constructs a fresh accumulator.
#[derive(Debug, Clone)]
pub struct EnvironmentAccumulator {
    temp_max: i32,
    humid_max: i32,
    noise_max: i32,
    temp_sum: i64,
    humid_sum: i64,
    noise_sum: i64,
    sample_count: u32,
}

impl EnvironmentAccumulator {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            temp_max: thresholds.temp_max,
            humid_max: thresholds.humid_max,
            noise_max: thresholds.noise_max,
            temp_sum: 0,
            humid_sum: 0,
            noise_sum: 0,
            sample_count: 0,
        }
    }

    /// Add a sample to the running sums and check the three thresholds.
    ///
    /// The breaches are independent and OR-combined by the caller; a noise
    /// breach additionally counts into the current tick window.
    pub fn ingest(&mut self, sample: &EnvSample) -> EnvBreach {
        self.temp_sum += i64::from(sample.temp);
        self.humid_sum += i64::from(sample.humid);
        self.noise_sum += i64::from(sample.noise);
        self.sample_count += 1;

        EnvBreach {
            temp: sample.temp > self.temp_max,
            humid: sample.humid > self.humid_max,
            noise: sample.noise > self.noise_max,
        }
    }

    /// Per-field averages over all ingested samples, or all zero when no
    /// sample has been ingested.
    pub fn averages(&self) -> EnvAverages {
        if self.sample_count == 0 {
            return EnvAverages::default();
        }
        let n = f64::from(self.sample_count);
        EnvAverages {
            temp: self.temp_sum as f64 / n,
            humid: self.humid_sum as f64 / n,
            noise: self.noise_sum as f64 / n,
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator() -> EnvironmentAccumulator {
        EnvironmentAccumulator::new(&Thresholds::default())
    }

    #[test]
    fn test_empty_averages_are_zero() {
        let acc = accumulator();
        assert_eq!(acc.averages(), EnvAverages::default());
    }

    #[test]
    fn test_no_breach_within_thresholds() {
        let mut acc = accumulator();
        let breach = acc.ingest(&EnvSample::new(30, 70, 70));
        // Thresholds are strict greater-than
        assert!(!breach.any());
    }

    #[test]
    fn test_independent_breaches() {
        let mut acc = accumulator();

        let breach = acc.ingest(&EnvSample::new(31, 50, 40));
        assert!(breach.temp && !breach.humid && !breach.noise);

        let breach = acc.ingest(&EnvSample::new(24, 71, 40));
        assert!(!breach.temp && breach.humid && !breach.noise);

        let breach = acc.ingest(&EnvSample::new(24, 50, 71));
        assert!(!breach.temp && !breach.humid && breach.noise);

        let breach = acc.ingest(&EnvSample::new(35, 80, 90));
        assert!(breach.temp && breach.humid && breach.noise);
    }

    #[test]
    fn test_running_averages() {
        let mut acc = accumulator();
        acc.ingest(&EnvSample::new(20, 40, 30));
        acc.ingest(&EnvSample::new(30, 60, 50));

        let avg = acc.averages();
        assert_eq!(avg.temp, 25.0);
        assert_eq!(avg.humid, 50.0);
        assert_eq!(avg.noise, 40.0);
        assert_eq!(acc.sample_count(), 2);
    }

    #[test]
    fn test_breach_description_names_fields() {
        let sample = EnvSample::new(32, 50, 75);
        let breach = EnvBreach {
            temp: true,
            humid: false,
            noise: true,
        };
        let msg = breach.describe(&sample);
        assert!(msg.contains("temperature 32C"));
        assert!(msg.contains("noise 75dB"));
        assert!(!msg.contains("humidity"));
    }
}
