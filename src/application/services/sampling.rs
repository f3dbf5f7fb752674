use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::entities::sample::MetricSample;
use crate::domain::ports::sampler::{Sampler, SamplerError};
use crate::domain::value_objects::strictness::PercentStrictness;

/// Runs a blocking [`Sampler`] off the async workers with a time limit.
///
/// At most one sampler call is in flight. A call that outlives its timeout
/// keeps the slot until it actually returns, and every request made in the
/// meantime fails with [`SamplerError::Busy`] instead of piling up another
/// blocking thread.
pub struct BoundedSampler {
    sampler: Arc<dyn Sampler>,
    timeout: Duration,
    strictness: PercentStrictness,
    sampling: Arc<watch::Sender<bool>>,
}

/// Frees the slot when the blocking call finishes, panics included.
struct SlotGuard(Arc<watch::Sender<bool>>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl BoundedSampler {
    #[must_use]
    pub fn new(
        sampler: Arc<dyn Sampler>,
        timeout: Duration,
        strictness: PercentStrictness,
    ) -> Self {
        let (sampling, _) = watch::channel(false);
        Self {
            sampler,
            timeout,
            strictness,
            sampling: Arc::new(sampling),
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `true` while a sampler call is running on the blocking pool.
    #[must_use]
    pub fn is_sampling(&self) -> bool {
        *self.sampling.borrow()
    }

    /// Take one validated reading.
    ///
    /// # Errors
    ///
    /// Returns `SamplerError::Busy` if an earlier call has not returned yet,
    /// `SamplerError::Timeout` if this call does not answer in time, or the
    /// sampler's own error.
    pub async fn sample(&self) -> Result<MetricSample, SamplerError> {
        if self.sampling.send_replace(true) {
            return Err(SamplerError::Busy);
        }

        let guard = SlotGuard(Arc::clone(&self.sampling));
        let sampler = Arc::clone(&self.sampler);
        let task = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            sampler.sample()
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => Ok(result?.validated(self.strictness)?),
            Ok(Err(e)) => Err(SamplerError::Unavailable(format!(
                "sampler task failed: {e}"
            ))),
            Err(_) => Err(SamplerError::Timeout(self.timeout)),
        }
    }

    /// Wait up to `limit` for an in-flight call to return.
    ///
    /// Returns `false` if the call is still running when the limit expires.
    pub async fn drain(&self, limit: Duration) -> bool {
        let mut idle = self.sampling.subscribe();
        tokio::time::timeout(limit, idle.wait_for(|busy| !busy))
            .await
            .is_ok_and(|r| r.is_ok())
    }
}
