use std::sync::Arc;

use crate::domain::ports::sink::{AlertSink, NotificationError, SinkEvent};

/// Forwards every event to several sinks.
///
/// Calls each sink in order and returns the first error (if any), but always
/// calls all of them.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl CompositeSink {
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn AlertSink>>) -> Self {
        Self { sinks }
    }
}

impl AlertSink for CompositeSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), NotificationError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.deliver(event) {
                tracing::warn!("Sink delivery failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
