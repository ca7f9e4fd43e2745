//! Tick pacing for the monitoring loop.
//!
//! The controller never sleeps directly; it asks its [`Clock`] to wait out
//! the remainder of the current tick. Tests substitute [`ManualClock`] so
//! sessions run without real delays.

use std::time::{Duration, Instant};

/// Paces the monitoring loop.
pub trait Clock {
    /// Block until the current tick's interval has elapsed.
    fn wait_tick(&mut self);
}

/// Wall-clock pacing at a fixed interval.
///
/// Sleeps only for the portion of the interval not already consumed by the
/// tick body, so the cadence stays close to nominal even when sensor reads
/// and notifications take time.
pub struct SystemClock {
    interval: Duration,
    last_tick: Instant,
}

impl SystemClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn wait_tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

/// A clock that never sleeps, counting ticks instead.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub ticks: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn wait_tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_counts_ticks() {
        let mut clock = ManualClock::new();
        clock.wait_tick();
        clock.wait_tick();
        assert_eq!(clock.ticks, 2);
    }

    #[test]
    fn test_zero_interval_never_sleeps() {
        let mut clock = SystemClock::new(Duration::from_secs(0));
        let start = Instant::now();
        clock.wait_tick();
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
