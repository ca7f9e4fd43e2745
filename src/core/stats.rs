//! Tick windows and session statistics.
//!
//! Ticks are tallied into fixed-length windows (60 ticks, nominally one
//! minute). Only a window that runs its full length is folded into the
//! session statistics; a window aborted by the stop button is discarded.

use serde::{Deserialize, Serialize};

/// Focus/noise tallies for one in-progress window of ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickWindow {
    /// Ticks recorded so far
    pub ticks: u32,
    /// Ticks on which the user was focused
    pub focus_count: u32,
    /// Ticks on which the noise threshold was breached
    pub noise_count: u32,
}

impl TickWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick's focus decision.
    pub fn record_tick(&mut self, focused: bool) {
        self.ticks += 1;
        if focused {
            self.focus_count += 1;
        }
    }

    /// Record a noise breach on the current tick.
    pub fn record_noise(&mut self) {
        self.noise_count += 1;
    }

    /// Whether the window has run its full length.
    pub fn is_complete(&self, window_ticks: u32) -> bool {
        self.ticks >= window_ticks
    }
}

/// Per-session minute counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Completed windows that met the focus tick minimum
    pub focus_time_min: u32,
    /// Completed windows that met the noise tick minimum
    pub noise_time_min: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a completed window into the counters.
    ///
    /// Callers must only pass windows that ran their full length; aborted
    /// windows are dropped without ever reaching this point.
    pub fn fold_window(&mut self, window: &TickWindow, focus_ticks_min: u32, noise_ticks_min: u32) {
        if window.focus_count >= focus_ticks_min {
            self.focus_time_min += 1;
        }
        if window.noise_count >= noise_ticks_min {
            self.noise_time_min += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(focus_count: u32, noise_count: u32) -> TickWindow {
        TickWindow {
            ticks: 60,
            focus_count,
            noise_count,
        }
    }

    #[test]
    fn test_window_completion() {
        let mut w = TickWindow::new();
        for _ in 0..59 {
            w.record_tick(true);
            assert!(!w.is_complete(60));
        }
        w.record_tick(false);
        assert!(w.is_complete(60));
        assert_eq!(w.focus_count, 59);
    }

    #[test]
    fn test_focus_minute_threshold() {
        let mut stats = SessionStats::new();
        stats.fold_window(&window(50, 0), 45, 20);
        assert_eq!(stats.focus_time_min, 1);

        stats.fold_window(&window(44, 0), 45, 20);
        assert_eq!(stats.focus_time_min, 1);

        // Exactly at the threshold counts
        stats.fold_window(&window(45, 0), 45, 20);
        assert_eq!(stats.focus_time_min, 2);
    }

    #[test]
    fn test_noise_minute_threshold() {
        let mut stats = SessionStats::new();
        stats.fold_window(&window(0, 25), 45, 20);
        assert_eq!(stats.noise_time_min, 1);

        stats.fold_window(&window(0, 10), 45, 20);
        assert_eq!(stats.noise_time_min, 1);

        stats.fold_window(&window(0, 20), 45, 20);
        assert_eq!(stats.noise_time_min, 2);
    }

    #[test]
    fn test_both_counters_from_one_window() {
        let mut stats = SessionStats::new();
        stats.fold_window(&window(50, 22), 45, 20);
        assert_eq!(stats.focus_time_min, 1);
        assert_eq!(stats.noise_time_min, 1);
    }
}
