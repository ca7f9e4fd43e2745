//! Focus detection from proximity stability.
//!
//! A user sitting still at the desk produces consecutive distance readings
//! within a few centimeters of each other. A reading outside the plausible
//! seated range, or a read timeout, never counts as focused.

use crate::config::Thresholds;
use crate::sensor::DistanceReading;

/// Turns one distance reading per tick into a focused/unfocused decision.
#[derive(Debug, Clone)]
pub struct FocusDetector {
    distance_min_cm: u32,
    distance_max_cm: u32,
    stable_delta_cm: u32,
    previous_distance: Option<u32>,
}

impl FocusDetector {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            distance_min_cm: thresholds.distance_min_cm,
            distance_max_cm: thresholds.distance_max_cm,
            stable_delta_cm: thresholds.stable_delta_cm,
            previous_distance: None,
        }
    }

    /// Classify one tick's reading.
    ///
    /// Timeouts and out-of-range readings are fail-safe unfocused and leave
    /// the stability history untouched. The first valid reading of a fresh
    /// sequence is optimistically focused; after that, focused means the
    /// delta against the previous valid reading stays within the stable
    /// threshold.
    pub fn is_focused(&mut self, reading: DistanceReading) -> bool {
        let Some(cm) = reading.centimeters() else {
            return false;
        };
        if cm < self.distance_min_cm || cm > self.distance_max_cm {
            return false;
        }

        match self.previous_distance.replace(cm) {
            None => true,
            Some(prev) => cm.abs_diff(prev) <= self.stable_delta_cm,
        }
    }
}
