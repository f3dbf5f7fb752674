#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc::Receiver;
use vmwatch::application::services::monitor::{MonitorError, MonitorLoop, MonitorSettings};
use vmwatch::domain::entities::sample::MetricSample;
use vmwatch::domain::ports::sampler::{Sampler, SamplerError};
use vmwatch::domain::ports::sink::SinkEvent;
use vmwatch::domain::value_objects::monitor_state::MonitorState;
use vmwatch::domain::value_objects::thresholds::ThresholdSet;
use vmwatch::infrastructure::notifications::channel::ChannelSink;

/// Plays back memory readings in order, then repeats a quiet reading.
struct MemoryScript {
    readings: Mutex<VecDeque<Result<f64, SamplerError>>>,
}

impl MemoryScript {
    fn new(readings: impl IntoIterator<Item = Result<f64, SamplerError>>) -> Self {
        Self {
            readings: Mutex::new(readings.into_iter().collect()),
        }
    }

    fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(Ok))
    }
}

impl Sampler for MemoryScript {
    fn sample(&self) -> Result<MetricSample, SamplerError> {
        let memory = self
            .readings
            .lock()
            .expect("mutex poisoned")
            .pop_front()
            .unwrap_or(Ok(20.0))?;
        Ok(MetricSample::new(Utc::now(), 10.0, memory, 0, 0, 30.0))
    }
}

fn settings(interval: Duration, capacity: usize) -> MonitorSettings {
    MonitorSettings {
        interval,
        history_capacity: capacity,
        sampler_timeout: Duration::from_millis(500),
        ..MonitorSettings::default()
    }
}

fn build(sampler: MemoryScript, settings: &MonitorSettings) -> (MonitorLoop, Receiver<SinkEvent>) {
    let (sink, rx) = ChannelSink::bounded(256);
    let monitor = MonitorLoop::new(
        Arc::new(sampler),
        ThresholdSet::default(),
        Arc::new(sink),
        settings,
    )
    .expect("valid monitor");
    (monitor, rx)
}

fn memory_values(index_of_spike: Option<usize>) -> Vec<f64> {
    (0..60)
        .map(|i| if Some(i) == index_of_spike { 97.0 } else { 40.0 })
        .collect()
}

async fn run_sixty_ticks(values: &[f64]) -> MonitorLoop {
    let (monitor, _rx) = build(
        MemoryScript::from_values(values),
        &settings(Duration::from_secs(1), 50),
    );
    for _ in 0..60 {
        let result = monitor.tick().await.expect("tick");
        assert!(result.recorded());
    }
    monitor
}

#[tokio::test]
async fn window_keeps_last_fifty_of_sixty() {
    let values: Vec<f64> = (0..60_u32).map(f64::from).collect();
    let monitor = run_sixty_ticks(&values).await;

    let memory: Vec<f64> = monitor
        .snapshot()
        .iter()
        .map(MetricSample::memory_percent)
        .collect();
    assert_eq!(memory.len(), 50);
    assert_eq!(memory, values[10..].to_vec());
}

#[tokio::test]
async fn spike_evicted_from_window_is_not_reported() {
    let monitor = run_sixty_ticks(&memory_values(Some(5))).await;
    let summary = monitor.summarize();
    assert_eq!(summary.sample_count, 50);
    assert!(!summary.high_memory_detected);
    assert_eq!(summary.max_memory_percent, Some(40.0));
}

#[tokio::test]
async fn spike_inside_window_is_reported() {
    for spike in [10, 35, 59] {
        let monitor = run_sixty_ticks(&memory_values(Some(spike))).await;
        let summary = monitor.summarize();
        assert!(summary.high_memory_detected, "spike at {spike}");
        assert_eq!(summary.max_memory_percent, Some(97.0));
    }
}

#[tokio::test]
async fn no_spike_no_detection() {
    let monitor = run_sixty_ticks(&memory_values(None)).await;
    assert!(!monitor.summarize().high_memory_detected);
}

#[tokio::test]
async fn snapshot_is_stable_without_new_samples() {
    let monitor = run_sixty_ticks(&memory_values(None)).await;
    assert_eq!(monitor.snapshot(), monitor.snapshot());
    assert_eq!(monitor.summarize(), monitor.summarize());
}

#[tokio::test]
async fn double_stop_is_safe_and_final() {
    let (monitor, _rx) = build(MemoryScript::new([]), &settings(Duration::from_millis(10), 50));
    let mut generation = monitor.subscribe();

    monitor.start().await.expect("start");
    generation.wait_for(|g| *g >= 2).await.expect("two ticks");

    let last = monitor.stop().await.expect("first stop");
    assert!(last.expect("final tick").recorded());
    assert_eq!(monitor.state(), MonitorState::Stopped);

    let after_stop = monitor.snapshot().len();
    assert!(monitor.stop().await.expect("second stop").is_none());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(monitor.snapshot().len(), after_stop);

    let err = monitor.start().await.expect_err("no restart");
    assert!(matches!(
        err,
        MonitorError::InvalidState {
            state: MonitorState::Stopped,
            ..
        }
    ));
}

#[tokio::test]
async fn sampler_failure_is_reported_and_loop_continues() {
    let script = MemoryScript::new([
        Err(SamplerError::Unavailable("counters busy".into())),
        Ok(95.0),
        Ok(30.0),
    ]);
    let (monitor, mut rx) = build(script, &settings(Duration::from_millis(10), 50));
    let mut generation = monitor.subscribe();

    monitor.start().await.expect("start");
    generation.wait_for(|g| *g >= 2).await.expect("two samples recorded");
    monitor.stop().await.expect("stop");

    let first = rx.recv().await.expect("failure event");
    assert!(matches!(
        first,
        SinkEvent::SamplerFailure {
            error: SamplerError::Unavailable(_),
            ..
        }
    ));
    let second = rx.recv().await.expect("memory alert");
    assert!(second.is_alert());

    let memory: Vec<f64> = monitor
        .snapshot()
        .iter()
        .map(MetricSample::memory_percent)
        .collect();
    assert_eq!(&memory[..2], &[95.0, 30.0]);
    assert!(monitor.summarize().high_memory_detected);
}

#[tokio::test]
async fn manual_tick_refused_while_running() {
    let (monitor, _rx) = build(MemoryScript::new([]), &settings(Duration::from_millis(10), 5));
    monitor.start().await.expect("start");
    assert!(matches!(
        monitor.tick().await,
        Err(MonitorError::InvalidState {
            state: MonitorState::Running,
            ..
        })
    ));
    monitor.stop().await.expect("stop");
}

#[test]
fn zero_capacity_is_rejected() {
    let (sink, _rx) = ChannelSink::bounded(1);
    let result = MonitorLoop::new(
        Arc::new(MemoryScript::new([])),
        ThresholdSet::default(),
        Arc::new(sink),
        &settings(Duration::from_secs(1), 0),
    );
    assert!(result.is_err());
}
