use chrono::{DateTime, Utc};
use thiserror::Error;

use super::sampler::SamplerError;
use crate::domain::entities::alert::Alert;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("failed to deliver event: {0}")]
    SendFailed(String),
    #[error("event channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Everything the monitor reports, tagged so consumers can treat alerts and
/// sampler failures differently.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Alert(Alert),
    SamplerFailure {
        timestamp: DateTime<Utc>,
        error: SamplerError,
    },
}

impl SinkEvent {
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Alert(alert) => alert.timestamp,
            Self::SamplerFailure { timestamp, .. } => *timestamp,
        }
    }

    #[must_use]
    pub const fn is_alert(&self) -> bool {
        matches!(self, Self::Alert(_))
    }
}

pub trait AlertSink: Send + Sync {
    /// Hand one event to the sink. Must return quickly; slow delivery
    /// belongs behind a buffer.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the event could not be delivered.
    /// The monitor logs the failure and carries on.
    fn deliver(&self, event: &SinkEvent) -> Result<(), NotificationError>;
}
