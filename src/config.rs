//! Configuration for Study Sentinel.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environmental and proximity thresholds for the monitoring loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Temperature above this value (°C) is an environmental breach
    pub temp_max: i32,
    /// Relative humidity above this value (%) is an environmental breach
    pub humid_max: i32,
    /// Noise above this value (dB) is an environmental breach
    pub noise_max: i32,
    /// Distances below this value (cm) never count as focused
    pub distance_min_cm: u32,
    /// Distances above this value (cm) never count as focused
    pub distance_max_cm: u32,
    /// Maximum distance delta (cm) between consecutive ticks to still count as focused
    pub stable_delta_cm: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temp_max: 30,
            humid_max: 70,
            noise_max: 70,
            distance_min_cm: 30,
            distance_max_cm: 100,
            stable_delta_cm: 5,
        }
    }
}

/// Main configuration for the session monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Nominal duration of one monitoring tick
    #[serde(with = "duration_serde")]
    pub tick_interval: Duration,

    /// Environmental and proximity thresholds
    pub thresholds: Thresholds,

    /// Number of ticks per statistics window
    pub window_ticks: u32,

    /// Consecutive unfocused ticks that fire the sustained-inattention alert
    pub unfocused_trigger: u32,

    /// Minimum focused ticks for a completed window to count as a focus minute
    pub focus_ticks_min: u32,

    /// Minimum noisy ticks for a completed window to count as a noise minute
    pub noise_ticks_min: u32,

    /// Path of the append-only session report log
    pub report_log_path: PathBuf,

    /// Path for storing state and diagnostics
    pub data_path: PathBuf,

    /// Remote endpoint for admin alerts (empty disables the channel)
    pub admin_endpoint: String,

    /// Local address of the user notification channel (empty falls back to console)
    pub user_channel_addr: String,

    /// Face id accepted by the simulated authenticator
    pub registered_face_id: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("study-sentinel");

        Self {
            tick_interval: Duration::from_secs(1),
            thresholds: Thresholds::default(),
            window_ticks: 60,
            unfocused_trigger: 10,
            focus_ticks_min: 45,
            noise_ticks_min: 20,
            report_log_path: data_dir.join("reports.log"),
            data_path: data_dir,
            admin_endpoint: String::new(),
            user_channel_addr: String::new(),
            registered_face_id: 1,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("study-sentinel")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        if let Some(parent) = self.report_log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.window_ticks, 60);
        assert_eq!(config.unfocused_trigger, 10);
        assert_eq!(config.focus_ticks_min, 45);
        assert_eq!(config.noise_ticks_min, 20);
    }

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.temp_max, 30);
        assert_eq!(t.humid_max, 70);
        assert_eq!(t.noise_max, 70);
        assert_eq!(t.distance_min_cm, 30);
        assert_eq!(t.distance_max_cm, 100);
        assert_eq!(t.stable_delta_cm, 5);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tick_interval, config.tick_interval);
        assert_eq!(parsed.thresholds.noise_max, config.thresholds.noise_max);
    }
}
