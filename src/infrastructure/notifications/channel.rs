use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::ports::sink::{AlertSink, NotificationError, SinkEvent};

/// Hands events to a bounded channel without waiting.
///
/// A full channel drops the event and reports `ChannelUnavailable`, so a
/// slow consumer never stalls the monitor.
pub struct ChannelSink {
    tx: mpsc::Sender<SinkEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<SinkEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl AlertSink for ChannelSink {
    fn deliver(&self, event: &SinkEvent) -> Result<(), NotificationError> {
        self.tx.try_send(event.clone()).map_err(|e| match e {
            TrySendError::Full(_) => {
                NotificationError::ChannelUnavailable("event buffer full".into())
            }
            TrySendError::Closed(_) => {
                NotificationError::ChannelUnavailable("event receiver dropped".into())
            }
        })
    }
}
