//! Core session logic for Study Sentinel.
//!
//! This module contains:
//! - Focus detection from proximity stability
//! - Environment accumulation and threshold checks
//! - The sustained-inattention alert policy
//! - Tick windows and session statistics
//! - The session state machine and its clock abstraction

pub mod alert;
pub mod clock;
pub mod environment;
pub mod focus;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use alert::{AlertEvent, AlertPolicy};
pub use clock::{Clock, ManualClock, SystemClock};
pub use environment::{EnvAverages, EnvBreach, EnvironmentAccumulator};
pub use focus::FocusDetector;
pub use session::{SessionController, SessionPhase};
pub use stats::{SessionStats, TickWindow};
