use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::entities::history::{SlidingWindowHistory, DEFAULT_HISTORY_CAPACITY};
use crate::domain::entities::sample::MetricSample;
use crate::domain::entities::summary::Summary;
use crate::domain::errors::ConfigError;
use crate::application::services::sampling::BoundedSampler;
use crate::domain::ports::sampler::Sampler;
use crate::domain::ports::sink::{AlertSink, SinkEvent};
use crate::domain::rules::ThresholdPolicy;
use crate::domain::value_objects::monitor_state::MonitorState;
use crate::domain::value_objects::strictness::PercentStrictness;
use crate::domain::value_objects::thresholds::ThresholdSet;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("cannot {operation} while the monitor is {state}")]
    InvalidState {
        operation: &'static str,
        state: MonitorState,
    },
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("monitor task failed: {0}")]
    TaskFailed(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Cadence, history and sampler settings for [`MonitorLoop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub interval: Duration,
    pub history_capacity: usize,
    /// Upper bound on a single sampler call
    pub sampler_timeout: Duration,
    pub strictness: PercentStrictness,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            sampler_timeout: Duration::from_secs(5),
            strictness: PercentStrictness::Clamp,
        }
    }
}

impl MonitorSettings {
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero interval, zero sampler timeout or
    /// zero history capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroDuration("sampling interval"));
        }
        if self.sampler_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("sampler timeout"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub alerts_count: usize,
    /// The recorded sample, `None` when the sampler failed and the tick was skipped
    pub sample: Option<MetricSample>,
}

impl TickResult {
    #[must_use]
    pub const fn recorded(&self) -> bool {
        self.sample.is_some()
    }
}

/// Cloneable read-only view of the history, for renderers on other tasks or threads.
///
/// Every read returns an owned copy; no lock outlives the call.
#[derive(Clone)]
pub struct HistoryReader {
    history: Arc<RwLock<SlidingWindowHistory>>,
    thresholds: ThresholdSet,
}

impl HistoryReader {
    #[must_use]
    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    #[must_use]
    pub fn summarize(&self) -> Summary {
        Summary::from_samples(&self.snapshot(), &self.thresholds)
    }

    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }
}

/// One tick: sample → evaluate → deliver → append → publish.
struct TickEngine {
    sampler: BoundedSampler,
    policy: ThresholdPolicy,
    sink: Arc<dyn AlertSink>,
    history: Arc<RwLock<SlidingWindowHistory>>,
    generation: watch::Sender<u64>,
}

impl TickEngine {
    async fn tick(&self) -> Result<TickResult, MonitorError> {
        let sample = match self.sampler.sample().await {
            Ok(sample) => sample,
            Err(error) => {
                tracing::error!("Sampler failed, tick skipped: {error}");
                self.deliver(&SinkEvent::SamplerFailure {
                    timestamp: Utc::now(),
                    error,
                });
                return Ok(TickResult {
                    alerts_count: 0,
                    sample: None,
                });
            }
        };

        let alerts = self.policy.evaluate(&sample);
        let alerts_count = alerts.len();

        if alerts.is_empty() {
            tracing::debug!(
                cpu = sample.cpu_percent(),
                memory = sample.memory_percent(),
                storage = sample.storage_percent(),
                "Tick OK, no alerts"
            );
        } else {
            tracing::info!("{alerts_count} alert(s) detected");
        }

        for alert in alerts {
            self.deliver(&SinkEvent::Alert(alert));
        }

        self.record(sample.clone())?;
        self.generation.send_modify(|g| *g = g.wrapping_add(1));

        Ok(TickResult {
            alerts_count,
            sample: Some(sample),
        })
    }

    /// Wait a bounded time for a sampler call left running by a timed-out tick.
    async fn drain(&self) {
        if !self.sampler.is_sampling() {
            return;
        }
        let limit = self.sampler.timeout();
        if !self.sampler.drain(limit).await {
            tracing::warn!("Sampler call still running after {limit:?}");
        }
    }

    fn record(&self, sample: MetricSample) -> Result<(), MonitorError> {
        let mut history = self
            .history
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        history.append(sample);

        if history.len() > history.capacity() {
            let message = format!(
                "history holds {} samples but capacity is {}",
                history.len(),
                history.capacity()
            );
            tracing::error!("Invariant violated: {message}");
            return Err(MonitorError::InvariantViolation(message));
        }
        Ok(())
    }

    fn deliver(&self, event: &SinkEvent) {
        if let Err(e) = self.sink.deliver(event) {
            tracing::warn!("Event delivery failed: {e}");
        }
    }
}

#[derive(Default)]
struct Control {
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<Result<(), MonitorError>>>,
}

/// Drives periodic sampling, alerting and history updates.
///
/// State machine: `Idle` → `start()` → `Running` → `stop()` → `Stopped`.
/// `start()` outside `Idle` returns [`MonitorError::InvalidState`] and changes
/// nothing. `stop()` from `Idle` or `Running` takes one final synchronous
/// sample; from `Stopped` it is a no-op.
pub struct MonitorLoop {
    engine: Arc<TickEngine>,
    interval: Duration,
    state: watch::Sender<MonitorState>,
    control: Mutex<Control>,
}

impl MonitorLoop {
    /// # Errors
    ///
    /// Returns `ConfigError` if the thresholds or settings are invalid.
    pub fn new(
        sampler: Arc<dyn Sampler>,
        thresholds: ThresholdSet,
        sink: Arc<dyn AlertSink>,
        settings: &MonitorSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let policy = ThresholdPolicy::new(thresholds)?;
        let history = SlidingWindowHistory::new(settings.history_capacity)?;
        let (generation, _) = watch::channel(0);
        let (state, _) = watch::channel(MonitorState::Idle);

        Ok(Self {
            engine: Arc::new(TickEngine {
                sampler: BoundedSampler::new(
                    sampler,
                    settings.sampler_timeout,
                    settings.strictness,
                ),
                policy,
                sink,
                history: Arc::new(RwLock::new(history)),
                generation,
            }),
            interval: settings.interval,
            state,
            control: Mutex::new(Control::default()),
        })
    }

    /// Begin sampling on the configured cadence. The first tick fires immediately.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidState` unless the monitor is `Idle`.
    pub async fn start(&self) -> Result<(), MonitorError> {
        let mut control = self.control.lock().await;
        let state = self.state();
        if state != MonitorState::Idle {
            return Err(MonitorError::InvalidState {
                operation: "start",
                state,
            });
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        control.task = Some(tokio::spawn(run_ticks(
            Arc::clone(&self.engine),
            self.interval,
            shutdown_rx,
        )));
        control.shutdown = Some(shutdown_tx);
        self.state.send_replace(MonitorState::Running);

        tracing::info!("Monitor started (interval: {:?})", self.interval);
        Ok(())
    }

    /// Stop sampling, then take one final sample so the last reading is captured.
    ///
    /// Safe to call from any task. A tick already in progress finishes first,
    /// and a sampler call left running by a timed-out tick gets up to one
    /// more sampler timeout to return. Once this returns no loop tick will
    /// run again. Returns `Ok(None)` when already stopped.
    ///
    /// # Errors
    ///
    /// Returns the loop's fatal error (an invariant violation) or
    /// `MonitorError::TaskFailed` if the loop task panicked.
    pub async fn stop(&self) -> Result<Option<TickResult>, MonitorError> {
        let mut control = self.control.lock().await;
        if self.state() == MonitorState::Stopped {
            tracing::debug!("Monitor already stopped");
            return Ok(None);
        }

        if let Some(shutdown) = control.shutdown.take() {
            let _ = shutdown.send(true);
        }
        let task = control.task.take();
        self.state.send_replace(MonitorState::Stopped);

        if let Some(task) = task {
            match task.await {
                Ok(result) => result?,
                Err(e) => return Err(MonitorError::TaskFailed(e.to_string())),
            }
        }

        self.engine.drain().await;
        let last = self.engine.tick().await?;
        self.engine.drain().await;
        tracing::info!("Monitor stopped");
        Ok(Some(last))
    }

    /// Run one tick by hand. Only allowed while `Idle`, so it never overlaps
    /// with the loop.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidState` outside `Idle`, or an invariant violation.
    pub async fn tick(&self) -> Result<TickResult, MonitorError> {
        let _control = self.control.lock().await;
        let state = self.state();
        if state != MonitorState::Idle {
            return Err(MonitorError::InvalidState {
                operation: "tick manually",
                state,
            });
        }
        self.engine.tick().await
    }

    #[must_use]
    pub fn state(&self) -> MonitorState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }

    /// Generation counter bumped after every recorded sample.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.engine.generation.subscribe()
    }

    #[must_use]
    pub fn reader(&self) -> HistoryReader {
        HistoryReader {
            history: Arc::clone(&self.engine.history),
            thresholds: self.engine.policy.thresholds().clone(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.reader().snapshot()
    }

    #[must_use]
    pub fn summarize(&self) -> Summary {
        self.reader().summarize()
    }

    #[must_use]
    pub fn thresholds(&self) -> &ThresholdSet {
        self.engine.policy.thresholds()
    }

    /// Explicit reset of the history window.
    pub fn clear_history(&self) {
        self.engine
            .history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.engine.generation.send_modify(|g| *g = g.wrapping_add(1));
    }
}

async fn run_ticks(
    engine: Arc<TickEngine>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), MonitorError> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        // Bounded by the sampler timeout; shutdown is seen before the next tick
        engine.tick().await?;
    }
    Ok(())
}
