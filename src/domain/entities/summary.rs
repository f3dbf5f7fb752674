use serde::{Deserialize, Serialize};

use super::sample::MetricSample;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Conclusions drawn from the current history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub sample_count: usize,
    pub max_cpu_percent: Option<f64>,
    pub max_memory_percent: Option<f64>,
    pub max_storage_percent: Option<f64>,
    /// `true` when the memory peak is strictly above the memory threshold
    pub high_memory_detected: bool,
}

impl Summary {
    #[must_use]
    pub fn from_samples(samples: &[MetricSample], thresholds: &ThresholdSet) -> Self {
        let max_memory_percent = peak(samples, MetricSample::memory_percent);

        Self {
            sample_count: samples.len(),
            max_cpu_percent: peak(samples, MetricSample::cpu_percent),
            max_memory_percent,
            max_storage_percent: peak(samples, MetricSample::storage_percent),
            high_memory_detected: max_memory_percent
                .is_some_and(|max| max > thresholds.memory_percent),
        }
    }
}

fn peak(samples: &[MetricSample], metric: fn(&MetricSample) -> f64) -> Option<f64> {
    samples.iter().map(metric).reduce(f64::max)
}
