//! Simulated sensor port.
//!
//! Stands in for the desk hardware so the monitor runs on any machine.
//! Readings are injected through a [`SimulatedHandle`]; the port latches the
//! last injected value and keeps returning it until a new one arrives, which
//! makes per-tick scripting deterministic in tests. Button presses are
//! queued edges, matching the debounced-edge contract of [`SensorPort`].

use crate::sensor::types::{Button, DistanceReading, EnvSample};
use crate::sensor::SensorPort;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Queue depth for injected readings and presses.
const CHANNEL_DEPTH: usize = 10_000;

/// Default steady-state readings before anything is injected.
const DEFAULT_DISTANCE_CM: u32 = 60;
const DEFAULT_ENV: EnvSample = EnvSample {
    temp: 24,
    humid: 50,
    noise: 40,
};

/// A software stand-in for the desk sensor unit.
pub struct SimulatedPort {
    distance_rx: Receiver<DistanceReading>,
    env_rx: Receiver<EnvSample>,
    start_rx: Receiver<()>,
    stop_rx: Receiver<()>,
    last_distance: DistanceReading,
    last_env: EnvSample,
    indicator: Arc<AtomicBool>,
    alarm: Arc<AtomicBool>,
}

/// Injection side of a [`SimulatedPort`].
///
/// Cloneable; the console bridge and tests use it to feed readings and
/// presses, and to observe the indicator and alarm output lines.
#[derive(Clone)]
pub struct SimulatedHandle {
    distance_tx: Sender<DistanceReading>,
    env_tx: Sender<EnvSample>,
    start_tx: Sender<()>,
    stop_tx: Sender<()>,
    indicator: Arc<AtomicBool>,
    alarm: Arc<AtomicBool>,
}

impl SimulatedPort {
    /// Create a simulated port and its injection handle.
    pub fn new() -> (Self, SimulatedHandle) {
        let (distance_tx, distance_rx) = bounded(CHANNEL_DEPTH);
        let (env_tx, env_rx) = bounded(CHANNEL_DEPTH);
        let (start_tx, start_rx) = bounded(CHANNEL_DEPTH);
        let (stop_tx, stop_rx) = bounded(CHANNEL_DEPTH);
        let indicator = Arc::new(AtomicBool::new(false));
        let alarm = Arc::new(AtomicBool::new(false));

        let port = Self {
            distance_rx,
            env_rx,
            start_rx,
            stop_rx,
            last_distance: DistanceReading::Centimeters(DEFAULT_DISTANCE_CM),
            last_env: DEFAULT_ENV,
            indicator: indicator.clone(),
            alarm: alarm.clone(),
        };
        let handle = SimulatedHandle {
            distance_tx,
            env_tx,
            start_tx,
            stop_tx,
            indicator,
            alarm,
        };
        (port, handle)
    }
}

impl SensorPort for SimulatedPort {
    fn read_distance(&mut self) -> DistanceReading {
        if let Ok(reading) = self.distance_rx.try_recv() {
            self.last_distance = reading;
        }
        self.last_distance
    }

    fn read_environment(&mut self) -> EnvSample {
        if let Ok(sample) = self.env_rx.try_recv() {
            self.last_env = sample;
        }
        self.last_env
    }

    fn read_button(&mut self, button: Button) -> bool {
        let rx = match button {
            Button::Start => &self.start_rx,
            Button::Stop => &self.stop_rx,
        };
        rx.try_recv().is_ok()
    }

    fn set_indicator(&mut self, on: bool) {
        self.indicator.store(on, Ordering::SeqCst);
    }

    fn set_alarm(&mut self, on: bool) {
        self.alarm.store(on, Ordering::SeqCst);
    }
}

impl SimulatedHandle {
    /// Inject a distance reading for the next tick.
    pub fn set_distance(&self, cm: u32) {
        let _ = self.distance_tx.send(DistanceReading::Centimeters(cm));
    }

    /// Inject a distance read timeout for the next tick.
    pub fn distance_timeout(&self) {
        let _ = self.distance_tx.send(DistanceReading::Timeout);
    }

    /// Inject an environment sample for the next tick.
    pub fn set_environment(&self, temp: i32, humid: i32, noise: i32) {
        let _ = self.env_tx.send(EnvSample::new(temp, humid, noise));
    }

    /// Queue one press edge of the given button.
    pub fn press(&self, button: Button) {
        let tx = match button {
            Button::Start => &self.start_tx,
            Button::Stop => &self.stop_tx,
        };
        let _ = tx.send(());
    }

    /// Current state of the indicator output line.
    pub fn indicator(&self) -> bool {
        self.indicator.load(Ordering::SeqCst)
    }

    /// Current state of the alarm output line.
    pub fn alarm(&self) -> bool {
        self.alarm.load(Ordering::SeqCst)
    }
}
