use crate::domain::ports::sink::{AlertSink, NotificationError, SinkEvent};

/// Routes events into the log: alerts at WARN, sampler failures at ERROR.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), NotificationError> {
        match event {
            SinkEvent::Alert(alert) => tracing::warn!(
                kind = %alert.kind,
                measured = alert.measured_value,
                threshold = alert.threshold,
                "{}",
                alert.message()
            ),
            SinkEvent::SamplerFailure { error, .. } => {
                tracing::error!("Sampling skipped: {error}");
            }
        }
        Ok(())
    }
}
