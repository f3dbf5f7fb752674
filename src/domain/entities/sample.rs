use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::strictness::PercentStrictness;

/// A percentage reading that cannot be stored as-is.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{metric} reading {value} is outside 0-100")]
pub struct RangeError {
    pub metric: &'static str,
    pub value: f64,
}

/// One timestamped reading of every tracked metric.
///
/// Fields are private: a sample never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    timestamp: DateTime<Utc>,
    cpu_percent: f64,
    memory_percent: f64,
    network_bytes_sent: u64,
    network_bytes_received: u64,
    storage_percent: f64,
}

impl MetricSample {
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        cpu_percent: f64,
        memory_percent: f64,
        network_bytes_sent: u64,
        network_bytes_received: u64,
        storage_percent: f64,
    ) -> Self {
        Self {
            timestamp,
            cpu_percent,
            memory_percent,
            network_bytes_sent,
            network_bytes_received,
            storage_percent,
        }
    }

    /// Bring percentage fields into 0-100 according to `strictness`.
    ///
    /// NaN is refused under both policies.
    ///
    /// # Errors
    ///
    /// Returns `RangeError` for the first offending metric when the reading is
    /// NaN, or out of range under `PercentStrictness::Reject`.
    pub fn validated(self, strictness: PercentStrictness) -> Result<Self, RangeError> {
        Ok(Self {
            cpu_percent: check_percent("cpu", self.cpu_percent, strictness)?,
            memory_percent: check_percent("memory", self.memory_percent, strictness)?,
            storage_percent: check_percent("storage", self.storage_percent, strictness)?,
            ..self
        })
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn cpu_percent(&self) -> f64 {
        self.cpu_percent
    }

    #[must_use]
    pub const fn memory_percent(&self) -> f64 {
        self.memory_percent
    }

    #[must_use]
    pub const fn network_bytes_sent(&self) -> u64 {
        self.network_bytes_sent
    }

    #[must_use]
    pub const fn network_bytes_received(&self) -> u64 {
        self.network_bytes_received
    }

    #[must_use]
    pub const fn storage_percent(&self) -> f64 {
        self.storage_percent
    }
}

fn check_percent(
    metric: &'static str,
    value: f64,
    strictness: PercentStrictness,
) -> Result<f64, RangeError> {
    if value.is_nan() {
        return Err(RangeError { metric, value });
    }
    if (0.0..=100.0).contains(&value) {
        return Ok(value);
    }
    match strictness {
        PercentStrictness::Clamp => Ok(value.clamp(0.0, 100.0)),
        PercentStrictness::Reject => Err(RangeError { metric, value }),
    }
}
