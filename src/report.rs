//! Session report generation and persistence.
//!
//! At session end the controller folds the session statistics and environment
//! averages into an immutable [`Report`], appends a fixed multi-field record
//! to the append-only report log, and sends a human-readable summary over the
//! user channel. A log open/write failure is non-fatal; the session still
//! completes.

use crate::core::{EnvAverages, SessionStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Immutable snapshot of one completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique id of the session this report describes
    pub session_id: String,
    /// When the report was generated (session end)
    pub generated_at: DateTime<Utc>,
    /// focus_time_min - 0.5 * noise_time_min, unclamped
    pub focus_score: f64,
    /// Completed windows meeting the focus minimum
    pub focus_time_min: u32,
    /// Completed windows meeting the noise minimum
    pub noise_time_min: u32,
    /// Session-average temperature (°C)
    pub avg_temp: f64,
    /// Session-average humidity (%)
    pub avg_humid: f64,
    /// Session-average noise (dB)
    pub avg_noise: f64,
}

impl Report {
    /// Human-readable summary for the user channel.
    pub fn summary(&self) -> String {
        format!(
            "Session complete. Focus score: {:.2} ({} focus min, {} noise min). \
             Averages: {:.1}C, {:.1}%, {:.1}dB",
            self.focus_score,
            self.focus_time_min,
            self.noise_time_min,
            self.avg_temp,
            self.avg_humid,
            self.avg_noise,
        )
    }

    /// Fixed multi-field record for the append-only log.
    pub fn record(&self) -> String {
        format!(
            "=== study session {} ===\n\
             focus_minutes: {}\n\
             noise_minutes: {}\n\
             focus_score: {:.2}\n\
             avg_temperature: {:.1}\n\
             avg_humidity: {:.1}\n\
             avg_noise: {:.1}\n\
             ---\n",
            self.generated_at.to_rfc3339(),
            self.focus_time_min,
            self.noise_time_min,
            self.focus_score,
            self.avg_temp,
            self.avg_humid,
            self.avg_noise,
        )
    }
}

/// Folds session statistics into reports and persists them.
pub struct ReportGenerator {
    log_path: PathBuf,
}

impl ReportGenerator {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }

    /// Build the report for a finished session.
    pub fn generate(&self, session_id: &str, stats: &SessionStats, averages: &EnvAverages) -> Report {
        let focus_score = f64::from(stats.focus_time_min) - 0.5 * f64::from(stats.noise_time_min);
        Report {
            session_id: session_id.to_string(),
            generated_at: Utc::now(),
            focus_score,
            focus_time_min: stats.focus_time_min,
            noise_time_min: stats.noise_time_min,
            avg_temp: averages.temp,
            avg_humid: averages.humid,
            avg_noise: averages.noise,
        }
    }

    /// Append the report record to the persistent log.
    pub fn append(&self, report: &Report) -> Result<(), ReportError> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::Io(e.to_string()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ReportError::Io(e.to_string()))?;
        file.write_all(report.record().as_bytes())
            .map_err(|e| ReportError::Io(e.to_string()))?;
        Ok(())
    }

    /// Fresh session id for the next session.
    pub fn new_session_id() -> String {
        format!("SESS-{}", Uuid::new_v4())
    }
}

/// Report persistence errors.
#[derive(Debug)]
pub enum ReportError {
    Io(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}
