use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::sample::{MetricSample, RangeError};

/// Failure to obtain a reading. The monitor skips the tick and keeps running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    #[error("failed to read system metrics: {0}")]
    Unavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("metric not supported on this platform: {0}")]
    Unsupported(String),
    #[error("sampler did not answer within {0:?}")]
    Timeout(Duration),
    #[error("previous sample still running")]
    Busy,
    #[error("invalid reading: {0}")]
    OutOfRange(#[from] RangeError),
}

pub trait Sampler: Send + Sync {
    /// Take one point-in-time reading of every tracked metric.
    ///
    /// May block (a CPU reading needs a measurement interval); callers
    /// bound the wait.
    ///
    /// # Errors
    ///
    /// Returns `SamplerError` if the underlying OS query cannot complete.
    fn sample(&self) -> Result<MetricSample, SamplerError>;
}
