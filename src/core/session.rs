//! The session state machine.
//!
//! One controller drives the whole desk unit through a cyclic lifecycle:
//!
//! ```text
//! Idle → Authenticating → AwaitingStart → Monitoring → Ending → Idle
//! ```
//!
//! Everything is single-threaded and tick-driven: one tick is one pass of
//! the Monitoring loop body, paced by the [`Clock`]. Cancellation is the
//! polled stop button (or the process-wide running flag), checked once per
//! tick, never an asynchronous interrupt.

use crate::auth::Authenticator;
use crate::config::Config;
use crate::core::alert::{AlertEvent, AlertPolicy};
use crate::core::clock::Clock;
use crate::core::environment::EnvironmentAccumulator;
use crate::core::focus::FocusDetector;
use crate::core::stats::{SessionStats, TickWindow};
use crate::notify::NotificationDispatcher;
use crate::report::{Report, ReportGenerator};
use crate::sensor::{Button, SensorPort};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Authenticating,
    AwaitingStart,
    Monitoring,
    Ending,
}

/// All mutable state of one active session.
///
/// Created at the AwaitingStart→Monitoring transition and dropped after the
/// report is generated, so no counters ever leak across sessions.
struct SessionState {
    detector: FocusDetector,
    accumulator: EnvironmentAccumulator,
    alerts: AlertPolicy,
    stats: SessionStats,
    window: TickWindow,
}

impl SessionState {
    fn new(config: &Config) -> Self {
        Self {
            detector: FocusDetector::new(&config.thresholds),
            accumulator: EnvironmentAccumulator::new(&config.thresholds),
            alerts: AlertPolicy::new(config.unfocused_trigger),
            stats: SessionStats::new(),
            window: TickWindow::new(),
        }
    }
}

/// Drives sessions forever: authenticates entry, waits for the start button,
/// runs the monitoring loop, and hands completed sessions to the report
/// generator.
pub struct SessionController<P, A, C>
where
    P: SensorPort,
    A: Authenticator,
    C: Clock,
{
    config: Config,
    port: P,
    auth: A,
    dispatcher: NotificationDispatcher,
    clock: C,
    reporter: ReportGenerator,
    phase: SessionPhase,
}

impl<P, A, C> SessionController<P, A, C>
where
    P: SensorPort,
    A: Authenticator,
    C: Clock,
{
    pub fn new(
        config: Config,
        port: P,
        auth: A,
        dispatcher: NotificationDispatcher,
        clock: C,
    ) -> Self {
        let reporter = ReportGenerator::new(config.report_log_path.clone());
        Self {
            config,
            port,
            auth,
            dispatcher,
            clock,
            reporter,
            phase: SessionPhase::Idle,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Run the unbounded multi-session loop until the flag is cleared.
    pub fn run(&mut self, running: Arc<AtomicBool>) {
        while running.load(Ordering::SeqCst) {
            self.run_once(&running);
        }
        self.phase = SessionPhase::Idle;
    }

    /// Drive one full cycle through the state machine.
    ///
    /// Returns the session report, or `None` when authentication failed or
    /// the running flag was cleared before a session produced one.
    pub fn run_once(&mut self, running: &AtomicBool) -> Option<Report> {
        // Idle → Authenticating: unconditional on loop entry.
        self.phase = SessionPhase::Authenticating;
        if !self.auth.authenticate() {
            debug!("authentication failed, retrying");
            self.phase = SessionPhase::Idle;
            self.clock.wait_tick();
            return None;
        }

        let entry_time = Utc::now();
        self.dispatcher.notify_user(&format!(
            "Entry authenticated at {}.",
            entry_time.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        self.phase = SessionPhase::AwaitingStart;

        // AwaitingStart → Monitoring: start-button edge.
        loop {
            if !running.load(Ordering::SeqCst) {
                self.phase = SessionPhase::Idle;
                return None;
            }
            if self.port.read_button(Button::Start) {
                break;
            }
            self.clock.wait_tick();
        }

        let session_id = ReportGenerator::new_session_id();
        let mut state = SessionState::new(&self.config);
        self.port.set_indicator(true);
        self.phase = SessionPhase::Monitoring;
        self.dispatcher.notify_user("Study session started.");
        debug!(%session_id, "session started");

        loop {
            // Stop edge: abort the in-progress window and end the session.
            // The partial window is discarded, never folded.
            if !running.load(Ordering::SeqCst) || self.port.read_button(Button::Stop) {
                break;
            }
            self.monitor_tick(&session_id, &mut state);
            self.clock.wait_tick();
        }

        // Monitoring → Ending.
        self.phase = SessionPhase::Ending;
        self.port.set_indicator(false);
        self.port.set_alarm(false);

        let report =
            self.reporter
                .generate(&session_id, &state.stats, &state.accumulator.averages());
        if let Err(e) = self.reporter.append(&report) {
            warn!(%session_id, "could not persist session report: {e}");
        }
        self.dispatcher.notify_user(&report.summary());
        debug!(%session_id, score = report.focus_score, "session ended");

        // Ending → Idle: session state dropped here.
        self.phase = SessionPhase::Idle;
        Some(report)
    }

    /// One pass of the Monitoring loop body.
    fn monitor_tick(&mut self, session_id: &str, state: &mut SessionState) {
        let reading = self.port.read_distance();
        let focused = state.detector.is_focused(reading);
        state.window.record_tick(focused);

        let event = state.alerts.on_tick(focused);
        // The alarm output pulses high for exactly the event tick.
        self.port.set_alarm(event.is_some());
        if let Some(AlertEvent::SustainedUnfocus) = event {
            self.dispatcher.notify_admin(&format!(
                "sustained inattention in session {session_id} \
                 ({} consecutive unfocused ticks)",
                self.config.unfocused_trigger
            ));
        }

        let sample = self.port.read_environment();
        let breach = state.accumulator.ingest(&sample);
        if breach.noise {
            state.window.record_noise();
        }
        if breach.any() {
            let message = breach.describe(&sample);
            self.dispatcher.broadcast(&message);
        }

        if state.window.is_complete(self.config.window_ticks) {
            state.stats.fold_window(
                &state.window,
                self.config.focus_ticks_min,
                self.config.noise_ticks_min,
            );
            state.window = TickWindow::new();
        }
    }
}
