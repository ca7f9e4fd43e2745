//! Study Sentinel - desk-side study session monitor.
//!
//! This library tracks a single user's study session: it authenticates entry,
//! waits for an explicit start signal, then runs a one-second monitoring loop
//! that infers presence from proximity stability, checks ambient
//! temperature/humidity/noise against thresholds, raises local and remote
//! alerts, and writes a focus report when the session ends.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Study Sentinel                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────────────┐   ┌────────────┐  │
//! │  │ SensorPort │──▶│  SessionController   │──▶│   Report   │  │
//! │  │ (dist/env/ │   │  Idle → Auth →       │   │ Generator  │  │
//! │  │  buttons)  │   │  AwaitingStart →     │   │ (append-   │  │
//! │  └────────────┘   │  Monitoring → Ending │   │  only log) │  │
//! │                   └──────────┬───────────┘   └────────────┘  │
//! │        ┌──────────┬──────────┴┬─────────┐                    │
//! │        ▼          ▼           ▼         ▼                    │
//! │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌──────────────┐        │
//! │  │  Focus  │ │  Env    │ │ Alert  │ │ Notification │        │
//! │  │Detector │ │ Accum.  │ │ Policy │ │  Dispatcher  │        │
//! │  └─────────┘ └─────────┘ └────────┘ └──────────────┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One tick is one pass of the monitoring loop, nominally one second. Ticks
//! are grouped into 60-tick windows; a window that completes without an early
//! stop folds its focus/noise tallies into the session statistics.
//!
//! # Example
//!
//! ```no_run
//! use study_sentinel::{
//!     auth::StaticAuth,
//!     config::Config,
//!     core::{SessionController, SystemClock},
//!     notify::NotificationDispatcher,
//!     sensor::SimulatedPort,
//! };
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! let config = Config::default();
//! let (port, _handle) = SimulatedPort::new();
//! let dispatcher = NotificationDispatcher::disabled();
//! let clock = SystemClock::new(config.tick_interval);
//! let mut controller =
//!     SessionController::new(config, port, StaticAuth::accepting(), dispatcher, clock);
//! let running = Arc::new(AtomicBool::new(true));
//! controller.run(running);
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod notify;
pub mod report;
pub mod sensor;

// Re-export key types at crate root for convenience
pub use auth::{Authenticator, PromptFaceAuth, StaticAuth};
pub use config::{Config, Thresholds};
pub use core::{
    AlertEvent, AlertPolicy, Clock, EnvironmentAccumulator, FocusDetector, ManualClock,
    SessionController, SessionPhase, SessionStats, SystemClock, TickWindow,
};
pub use notify::{AdminChannel, NotificationDispatcher, UserChannel};
pub use report::{Report, ReportGenerator};
pub use sensor::{Button, DistanceReading, EnvSample, SensorPort, SimulatedHandle, SimulatedPort};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
