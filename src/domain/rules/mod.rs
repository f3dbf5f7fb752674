pub mod cpu;
pub mod memory;
pub mod network;
pub mod storage;

use crate::domain::entities::alert::{Alert, AlertKind};
use crate::domain::entities::sample::MetricSample;
use crate::domain::errors::ConfigError;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// A deterministic check of one metric against its limit.
/// Rules are pure functions: sample + thresholds in, alert out. No I/O.
pub trait Rule: Send + Sync {
    fn kind(&self) -> AlertKind;

    fn evaluate(&self, sample: &MetricSample, thresholds: &ThresholdSet) -> Option<Alert>;
}

/// Returns the rules in emission order: CPU, memory, storage, network sent.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(cpu::CpuRule),
        Box::new(memory::MemoryRule),
        Box::new(storage::StorageRule),
        Box::new(network::NetworkSentRule),
    ]
}

/// Shared strict comparison used by every rule.
fn exceeded(
    kind: AlertKind,
    measured_value: f64,
    threshold: f64,
    sample: &MetricSample,
) -> Option<Alert> {
    (measured_value > threshold).then(|| Alert {
        kind,
        measured_value,
        threshold,
        timestamp: sample.timestamp(),
    })
}

/// Evaluates samples against a fixed threshold set.
pub struct ThresholdPolicy {
    thresholds: ThresholdSet,
    rules: Vec<Box<dyn Rule>>,
}

impl ThresholdPolicy {
    /// # Errors
    ///
    /// Returns `ConfigError` if the thresholds are invalid.
    pub fn new(thresholds: ThresholdSet) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            rules: default_rules(),
        })
    }

    /// Alerts raised by `sample`, in rule order. Empty when nothing is breached.
    #[must_use]
    pub fn evaluate(&self, sample: &MetricSample) -> Vec<Alert> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(sample, &self.thresholds))
            .collect()
    }

    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }
}
