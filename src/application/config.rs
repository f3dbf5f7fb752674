use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::services::monitor::MonitorSettings;
use crate::domain::errors::ConfigError;
use crate::domain::value_objects::strictness::PercentStrictness;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Sampling cadence, history window and sampler behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_sampler_timeout")]
    pub sampler_timeout_secs: u64,
    /// Reject out-of-range percentages instead of clamping them
    #[serde(default)]
    pub strict_percentages: bool,
    #[serde(default = "default_storage_mount")]
    pub storage_mount: String,
}

/// Alert thresholds. A metric alerts when strictly above its limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_percent_threshold")]
    pub cpu_percent: f64,
    #[serde(default = "default_percent_threshold")]
    pub memory_percent: f64,
    #[serde(default = "default_percent_threshold")]
    pub storage_percent: f64,
    #[serde(default = "default_network_sent")]
    pub network_sent_bytes: u64,
}

/// Where alerts and sampler failures are delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Print alerts to the terminal in headless mode
    #[serde(default = "default_true")]
    pub terminal: bool,
    /// Events buffered for the dashboard before new ones are dropped
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

// --- Defaults ---

const fn default_interval() -> u64 {
    1
}

const fn default_history_capacity() -> usize {
    50
}

const fn default_sampler_timeout() -> u64 {
    5
}

fn default_storage_mount() -> String {
    "/".into()
}

const fn default_percent_threshold() -> f64 {
    90.0
}

const fn default_network_sent() -> u64 {
    1_000_000
}

const fn default_true() -> bool {
    true
}

const fn default_event_buffer() -> usize {
    64
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            history_capacity: default_history_capacity(),
            sampler_timeout_secs: default_sampler_timeout(),
            strict_percentages: false,
            storage_mount: default_storage_mount(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_percent: default_percent_threshold(),
            memory_percent: default_percent_threshold(),
            storage_percent: default_percent_threshold(),
            network_sent_bytes: default_network_sent(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            terminal: default_true(),
            event_buffer: default_event_buffer(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from the default path, creating it with defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("vmwatch").join("config.toml"))
    }

    /// Validated thresholds and monitor settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for the first invalid value.
    pub fn monitor_parts(&self) -> Result<(ThresholdSet, MonitorSettings), ConfigError> {
        Ok((
            ThresholdSet::try_from(&self.thresholds)?,
            MonitorSettings::try_from(&self.general)?,
        ))
    }
}

impl TryFrom<&ThresholdConfig> for ThresholdSet {
    type Error = ConfigError;

    fn try_from(config: &ThresholdConfig) -> Result<Self, Self::Error> {
        Self::new(
            config.cpu_percent,
            config.memory_percent,
            config.storage_percent,
            config.network_sent_bytes,
        )
    }
}

impl TryFrom<&GeneralConfig> for MonitorSettings {
    type Error = ConfigError;

    fn try_from(config: &GeneralConfig) -> Result<Self, Self::Error> {
        let settings = Self {
            interval: Duration::from_secs(config.interval_secs),
            history_capacity: config.history_capacity,
            sampler_timeout: Duration::from_secs(config.sampler_timeout_secs),
            strictness: PercentStrictness::from_strict(config.strict_percentages),
        };
        settings.validate()?;
        Ok(settings)
    }
}
