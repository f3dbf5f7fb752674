use crate::domain::entities::alert::{Alert, AlertKind};
use crate::domain::entities::sample::MetricSample;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::{exceeded, Rule};

pub struct CpuRule;

impl Rule for CpuRule {
    fn kind(&self) -> AlertKind {
        AlertKind::Cpu
    }

    fn evaluate(&self, sample: &MetricSample, thresholds: &ThresholdSet) -> Option<Alert> {
        exceeded(
            self.kind(),
            sample.cpu_percent(),
            thresholds.cpu_percent,
            sample,
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn with_cpu(cpu: f64) -> MetricSample {
        MetricSample::new(Utc::now(), cpu, 10.0, 0, 0, 10.0)
    }

    #[test]
    fn at_threshold_does_not_fire() {
        assert!(CpuRule
            .evaluate(&with_cpu(90.0), &ThresholdSet::default())
            .is_none());
    }

    #[test]
    fn just_above_threshold_fires() {
        let alert = CpuRule
            .evaluate(&with_cpu(90.01), &ThresholdSet::default())
            .expect("cpu alert");
        assert_eq!(alert.kind, AlertKind::Cpu);
        assert!((alert.measured_value - 90.01).abs() < f64::EPSILON);
    }

    #[test]
    fn respects_custom_threshold() {
        let thresholds = ThresholdSet {
            cpu_percent: 50.0,
            ..ThresholdSet::default()
        };
        assert!(CpuRule.evaluate(&with_cpu(60.0), &thresholds).is_some());
        assert!(CpuRule.evaluate(&with_cpu(40.0), &thresholds).is_none());
    }
}
