use crate::domain::entities::alert::{Alert, AlertKind};
use crate::domain::entities::sample::MetricSample;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::Rule;

/// Compares the cumulative bytes-sent counter only. Received traffic is
/// recorded in history but never alerted on.
pub struct NetworkSentRule;

impl Rule for NetworkSentRule {
    fn kind(&self) -> AlertKind {
        AlertKind::NetworkSent
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, sample: &MetricSample, thresholds: &ThresholdSet) -> Option<Alert> {
        let sent = sample.network_bytes_sent();
        (sent > thresholds.network_sent_bytes).then(|| Alert {
            kind: self.kind(),
            measured_value: sent as f64,
            threshold: thresholds.network_sent_bytes as f64,
            timestamp: sample.timestamp(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn with_traffic(sent: u64, received: u64) -> MetricSample {
        MetricSample::new(Utc::now(), 10.0, 10.0, sent, received, 10.0)
    }

    #[test]
    fn at_threshold_does_not_fire() {
        let thresholds = ThresholdSet::default();
        assert!(NetworkSentRule
            .evaluate(&with_traffic(1_000_000, 0), &thresholds)
            .is_none());
    }

    #[test]
    fn one_byte_over_fires() {
        let thresholds = ThresholdSet::default();
        let alert = NetworkSentRule
            .evaluate(&with_traffic(1_000_001, 0), &thresholds)
            .expect("network alert");
        assert_eq!(alert.kind, AlertKind::NetworkSent);
        assert!((alert.measured_value - 1_000_001.0).abs() < f64::EPSILON);
    }

    #[test]
    fn received_traffic_is_ignored() {
        let thresholds = ThresholdSet::default();
        assert!(NetworkSentRule
            .evaluate(&with_traffic(0, u64::MAX), &thresholds)
            .is_none());
    }
}
