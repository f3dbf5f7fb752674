use crate::domain::entities::alert::{Alert, AlertKind};
use crate::domain::entities::sample::MetricSample;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::{exceeded, Rule};

pub struct MemoryRule;

impl Rule for MemoryRule {
    fn kind(&self) -> AlertKind {
        AlertKind::Memory
    }

    fn evaluate(&self, sample: &MetricSample, thresholds: &ThresholdSet) -> Option<Alert> {
        exceeded(
            self.kind(),
            sample.memory_percent(),
            thresholds.memory_percent,
            sample,
        )
    }
}
