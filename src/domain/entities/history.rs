use std::collections::VecDeque;

use super::sample::MetricSample;
use crate::domain::errors::ConfigError;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded, chronologically ordered window of the most recent samples.
///
/// Appending at capacity evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct SlidingWindowHistory {
    samples: VecDeque<MetricSample>,
    max_size: usize,
}

impl SlidingWindowHistory {
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroCapacity` if `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self, ConfigError> {
        if max_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            samples: VecDeque::with_capacity(max_size),
            max_size,
        })
    }

    pub fn append(&mut self, sample: MetricSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.max_size {
            self.samples.pop_front();
        }
    }

    /// Owned copy of the window, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.max_size
    }
}
