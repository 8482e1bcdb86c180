mod error;


pub use error::ConfigError;

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Agent configuration, loaded from a TOML file with per-key defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Log verbosity; seeds the subscriber filter unless `RUST_LOG` is set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Access log file to tail.
    #[serde(default = "default_access_log")]
    pub access_log: PathBuf,

    /// Recent traffic, in whole megabytes, at or above which the alert fires.
    #[serde(default = "default_traffic_threshold_mb")]
    pub traffic_threshold_mb: u64,

    /// Number of top sections reported after each batch.
    #[serde(default = "default_top_sections")]
    pub top_sections: usize,

    /// Seconds between tail cycles.
    #[serde(default = "default_refresh_period_secs")]
    pub refresh_period_secs: u64,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_access_log() -> PathBuf {
    PathBuf::from("logs")
}

fn default_traffic_threshold_mb() -> u64 {
    1
}

fn default_top_sections() -> usize {
    3
}

fn default_refresh_period_secs() -> u64 {
    10
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            access_log: default_access_log(),
            traffic_threshold_mb: default_traffic_threshold_mb(),
            top_sections: default_top_sections(),
            refresh_period_secs: default_refresh_period_secs(),
        }
    }
}

impl MonitorConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let cfg: Self = toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_log.as_os_str().is_empty() {
            return Err(ConfigError::EmptyAccessLog);
        }

        if self.refresh_period_secs == 0 {
            return Err(ConfigError::ZeroRefreshPeriod);
        }

        // The level must be something the subscriber filter understands.
        let level = self.log_level.to_ascii_lowercase();
        if !matches!(level.as_str(), "error" | "warn" | "info" | "debug" | "trace") {
            return Err(ConfigError::InvalidLogLevel {
                level: self.log_level.clone(),
            });
        }

        Ok(())
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_secs)
    }

    /// Log the effective configuration at startup.
    pub fn log(&self) {
        tracing::debug!(
            log_level = %self.log_level,
            access_log = %self.access_log.display(),
            traffic_threshold_mb = self.traffic_threshold_mb,
            top_sections = self.top_sections,
            refresh_period_secs = self.refresh_period_secs,
            "Configuration"
        );
    }
}
