//! End-to-end tests for the session state machine.
//!
//! A scripted sensor port replays fixed per-tick readings so whole sessions
//! run deterministically without real delays.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use study_sentinel::{
    auth::StaticAuth,
    config::Config,
    core::{ManualClock, SessionController},
    notify::NotificationDispatcher,
    sensor::{Button, DistanceReading, EnvSample, SensorPort},
};

/// Replays per-tick readings; the stop button fires after a fixed number of
/// monitoring ticks.
struct ScriptedPort {
    distances: Vec<DistanceReading>,
    envs: Vec<EnvSample>,
    distance_reads: usize,
    env_reads: usize,
    stop_polls: usize,
    stop_after_ticks: usize,
    alarm_pulses: Arc<AtomicUsize>,
    alarm: bool,
}

impl ScriptedPort {
    fn new(distances: Vec<DistanceReading>, envs: Vec<EnvSample>, stop_after_ticks: usize) -> Self {
        Self {
            distances,
            envs,
            distance_reads: 0,
            env_reads: 0,
            stop_polls: 0,
            stop_after_ticks,
            alarm_pulses: Arc::new(AtomicUsize::new(0)),
            alarm: false,
        }
    }

    /// Shared counter of alarm rising edges, usable after the controller
    /// takes ownership of the port.
    fn alarm_pulses(&self) -> Arc<AtomicUsize> {
        self.alarm_pulses.clone()
    }
}

impl SensorPort for ScriptedPort {
    fn read_distance(&mut self) -> DistanceReading {
        let reading = self
            .distances
            .get(self.distance_reads)
            .copied()
            .unwrap_or(DistanceReading::Centimeters(60));
        self.distance_reads += 1;
        reading
    }

    fn read_environment(&mut self) -> EnvSample {
        let sample = self
            .envs
            .get(self.env_reads)
            .copied()
            .unwrap_or(EnvSample::new(24, 50, 40));
        self.env_reads += 1;
        sample
    }

    fn read_button(&mut self, button: Button) -> bool {
        match button {
            Button::Start => true,
            Button::Stop => {
                self.stop_polls += 1;
                self.stop_polls > self.stop_after_ticks
            }
        }
    }

    fn set_indicator(&mut self, _on: bool) {}

    fn set_alarm(&mut self, on: bool) {
        if on && !self.alarm {
            self.alarm_pulses.fetch_add(1, Ordering::SeqCst);
        }
        self.alarm = on;
    }
}

const FOCUSED: DistanceReading = DistanceReading::Centimeters(60);
const AWAY: DistanceReading = DistanceReading::Centimeters(200);
const QUIET: EnvSample = EnvSample {
    temp: 24,
    humid: 50,
    noise: 40,
};
const NOISY: EnvSample = EnvSample {
    temp: 24,
    humid: 50,
    noise: 80,
};

fn repeat<T: Copy>(value: T, n: usize) -> Vec<T> {
    vec![value; n]
}

fn run_session(port: ScriptedPort, log_dir: &std::path::Path) -> study_sentinel::Report {
    let mut config = Config::default();
    config.report_log_path = log_dir.join("reports.log");
    let mut controller = SessionController::new(
        config,
        port,
        StaticAuth::accepting(),
        NotificationDispatcher::disabled(),
        ManualClock::new(),
    );
    let running = AtomicBool::new(true);
    controller.run_once(&running).expect("session should complete")
}

#[test]
fn two_window_session_produces_expected_report() {
    // Window 1: 50 focused / 10 away ticks, 10 noisy ticks -> focus minute only.
    // Window 2: 40 focused / 20 away ticks, 22 noisy ticks -> noise minute only.
    let mut distances = Vec::new();
    distances.extend(repeat(FOCUSED, 45));
    distances.extend(repeat(AWAY, 10));
    distances.extend(repeat(FOCUSED, 5));
    distances.extend(repeat(FOCUSED, 40));
    distances.extend(repeat(AWAY, 20));

    let mut envs = Vec::new();
    envs.extend(repeat(NOISY, 10));
    envs.extend(repeat(QUIET, 50));
    envs.extend(repeat(NOISY, 22));
    envs.extend(repeat(QUIET, 38));

    let dir = tempfile::tempdir().unwrap();
    let report = run_session(ScriptedPort::new(distances, envs, 120), dir.path());

    assert_eq!(report.focus_time_min, 1);
    assert_eq!(report.noise_time_min, 1);
    assert_eq!(report.focus_score, 0.5);

    let log = std::fs::read_to_string(dir.path().join("reports.log")).unwrap();
    assert_eq!(log.matches("=== study session ").count(), 1);
    assert!(log.contains("focus_minutes: 1\n"));
    assert!(log.contains("noise_minutes: 1\n"));
    assert!(log.contains("focus_score: 0.50\n"));
    assert!(log.trim_end().ends_with("---"));
}

#[test]
fn aborted_window_is_discarded() {
    // 59 fully focused, fully noisy ticks, stopped one tick short of the
    // window boundary: nothing may reach the session statistics.
    let distances = repeat(FOCUSED, 59);
    let envs = repeat(NOISY, 59);

    let dir = tempfile::tempdir().unwrap();
    let report = run_session(ScriptedPort::new(distances, envs, 59), dir.path());

    assert_eq!(report.focus_time_min, 0);
    assert_eq!(report.noise_time_min, 0);
    assert_eq!(report.focus_score, 0.0);
}

#[test]
fn completed_window_then_aborted_window_keeps_only_the_first() {
    // One full focused window, then 30 more focused ticks before the stop.
    let distances = repeat(FOCUSED, 90);
    let envs = repeat(QUIET, 90);

    let dir = tempfile::tempdir().unwrap();
    let report = run_session(ScriptedPort::new(distances, envs, 90), dir.path());

    assert_eq!(report.focus_time_min, 1);
    assert_eq!(report.noise_time_min, 0);
    assert_eq!(report.focus_score, 1.0);
}

#[test]
fn sustained_unfocus_pulses_alarm_once_per_run() {
    // Two separate away runs of 15 ticks each, separated by focused ticks.
    // Each run fires exactly one alarm pulse, on its tenth tick.
    let mut distances = Vec::new();
    distances.extend(repeat(FOCUSED, 5));
    distances.extend(repeat(AWAY, 15));
    distances.extend(repeat(FOCUSED, 10));
    distances.extend(repeat(AWAY, 15));
    distances.extend(repeat(FOCUSED, 15));
    let ticks = distances.len();
    let envs = repeat(QUIET, ticks);

    let dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.report_log_path = dir.path().join("reports.log");
    let port = ScriptedPort::new(distances, envs, ticks);
    let pulses = port.alarm_pulses();
    let mut controller = SessionController::new(
        config,
        port,
        StaticAuth::accepting(),
        NotificationDispatcher::disabled(),
        ManualClock::new(),
    );
    let running = AtomicBool::new(true);
    controller.run_once(&running).unwrap();
    assert_eq!(pulses.load(Ordering::SeqCst), 2);

    // Short away run: never reaches the trigger, no pulse.
    let distances = repeat(AWAY, 9);
    let envs = repeat(QUIET, 9);
    let dir2 = tempfile::tempdir().unwrap();
    let port = ScriptedPort::new(distances, envs, 9);
    let pulses = port.alarm_pulses();
    let report = run_session(port, dir2.path());
    assert_eq!(pulses.load(Ordering::SeqCst), 0);
    assert_eq!(report.focus_time_min, 0);
}

#[test]
fn timeout_ticks_count_as_unfocused() {
    // A full window of read timeouts: zero focused ticks, no focus minute.
    let distances = repeat(DistanceReading::Timeout, 60);
    let envs = repeat(QUIET, 60);

    let dir = tempfile::tempdir().unwrap();
    let report = run_session(ScriptedPort::new(distances, envs, 60), dir.path());

    assert_eq!(report.focus_time_min, 0);
}

#[test]
fn environment_averages_cover_the_whole_session() {
    // 30 ticks at 20C and 30 ticks at 30C average to 25C.
    let distances = repeat(FOCUSED, 60);
    let mut envs = Vec::new();
    envs.extend(repeat(EnvSample::new(20, 40, 30), 30));
    envs.extend(repeat(EnvSample::new(30, 60, 50), 30));

    let dir = tempfile::tempdir().unwrap();
    let report = run_session(ScriptedPort::new(distances, envs, 60), dir.path());

    assert_eq!(report.avg_temp, 25.0);
    assert_eq!(report.avg_humid, 50.0);
    assert_eq!(report.avg_noise, 40.0);
}

#[test]
fn consecutive_sessions_do_not_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.report_log_path = dir.path().join("reports.log");

    // One controller, two sessions. The first accumulates a focus minute and
    // a noise minute; the stop button stays pressed afterwards, so the second
    // session records no ticks and must report from a clean slate.
    let port = ScriptedPort::new(repeat(FOCUSED, 60), repeat(NOISY, 60), 60);
    let mut controller = SessionController::new(
        config,
        port,
        StaticAuth::accepting(),
        NotificationDispatcher::disabled(),
        ManualClock::new(),
    );
    let running = AtomicBool::new(true);
    let first = controller.run_once(&running).unwrap();
    assert_eq!(first.focus_time_min, 1);
    assert_eq!(first.noise_time_min, 1);

    let second = controller.run_once(&running).unwrap();
    assert_eq!(second.focus_time_min, 0);
    assert_eq!(second.noise_time_min, 0);
    assert_eq!(second.avg_temp, 0.0);

    // Both sessions persisted their own record.
    let log = std::fs::read_to_string(dir.path().join("reports.log")).unwrap();
    assert_eq!(log.matches("=== study session ").count(), 2);
}
