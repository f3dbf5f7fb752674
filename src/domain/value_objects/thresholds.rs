use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigError;

/// Alert limits for each tracked metric.
///
/// A metric alerts only when its reading is strictly greater than the limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// CPU usage percentage
    pub cpu_percent: f64,
    /// Memory usage percentage
    pub memory_percent: f64,
    /// Storage usage percentage of the monitored mount
    pub storage_percent: f64,
    /// Cumulative bytes sent since boot
    pub network_sent_bytes: u64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            cpu_percent: 90.0,
            memory_percent: 90.0,
            storage_percent: 90.0,
            network_sent_bytes: 1_000_000,
        }
    }
}

impl ThresholdSet {
    /// Build a validated threshold set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ThresholdOutOfRange` if a percentage limit is
    /// not a finite value within 0-100.
    pub fn new(
        cpu_percent: f64,
        memory_percent: f64,
        storage_percent: f64,
        network_sent_bytes: u64,
    ) -> Result<Self, ConfigError> {
        let thresholds = Self {
            cpu_percent,
            memory_percent,
            storage_percent,
            network_sent_bytes,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ThresholdOutOfRange` for the first percentage
    /// limit outside 0-100 (NaN included).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cpu", self.cpu_percent),
            ("memory", self.memory_percent),
            ("storage", self.storage_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
