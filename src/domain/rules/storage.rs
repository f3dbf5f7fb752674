use crate::domain::entities::alert::{Alert, AlertKind};
use crate::domain::entities::sample::MetricSample;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::{exceeded, Rule};

pub struct StorageRule;

impl Rule for StorageRule {
    fn kind(&self) -> AlertKind {
        AlertKind::Storage
    }

    fn evaluate(&self, sample: &MetricSample, thresholds: &ThresholdSet) -> Option<Alert> {
        exceeded(
            self.kind(),
            sample.storage_percent(),
            thresholds.storage_percent,
            sample,
        )
    }
}
