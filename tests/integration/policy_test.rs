#![allow(clippy::expect_used)]

use chrono::Utc;
use vmwatch::domain::entities::alert::AlertKind;
use vmwatch::domain::entities::sample::MetricSample;
use vmwatch::domain::entities::summary::Summary;
use vmwatch::domain::errors::ConfigError;
use vmwatch::domain::rules::ThresholdPolicy;
use vmwatch::domain::value_objects::thresholds::ThresholdSet;

fn load_fixture(name: &str) -> Vec<MetricSample> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

fn sample(cpu: f64, memory: f64, storage: f64, sent: u64, received: u64) -> MetricSample {
    MetricSample::new(Utc::now(), cpu, memory, sent, received, storage)
}

fn default_policy() -> ThresholdPolicy {
    ThresholdPolicy::new(ThresholdSet::default()).expect("default thresholds")
}

fn kinds(policy: &ThresholdPolicy, s: &MetricSample) -> Vec<AlertKind> {
    policy.evaluate(s).iter().map(|a| a.kind).collect()
}

#[test]
fn cpu_exactly_at_threshold_is_quiet() {
    let policy = default_policy();
    assert!(policy.evaluate(&sample(90.0, 10.0, 10.0, 0, 0)).is_empty());
}

#[test]
fn cpu_just_above_threshold_alerts_once() {
    let policy = default_policy();
    let alerts = policy.evaluate(&sample(90.01, 10.0, 10.0, 0, 0));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Cpu);
    assert!((alerts[0].measured_value - 90.01).abs() < f64::EPSILON);
}

#[test]
fn high_cpu_alone_yields_single_cpu_alert() {
    let policy = default_policy();
    let alerts = policy.evaluate(&sample(95.0, 50.0, 50.0, 0, 0));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Cpu);
    assert_eq!(alerts[0].message(), "CPU usage is 95.0%.");
}

#[test]
fn network_boundary_is_strict() {
    let policy = default_policy();
    assert!(policy.evaluate(&sample(0.0, 0.0, 0.0, 1_000_000, 0)).is_empty());
    assert_eq!(
        kinds(&policy, &sample(0.0, 0.0, 0.0, 1_000_001, 0)),
        vec![AlertKind::NetworkSent]
    );
}

#[test]
fn received_bytes_never_alert() {
    let policy = default_policy();
    assert!(policy
        .evaluate(&sample(0.0, 0.0, 0.0, 0, u64::MAX))
        .is_empty());
}

#[test]
fn custom_thresholds_apply_per_metric() {
    let thresholds = ThresholdSet::new(50.0, 60.0, 70.0, 10).expect("valid thresholds");
    let policy = ThresholdPolicy::new(thresholds).expect("policy");
    assert_eq!(
        kinds(&policy, &sample(55.0, 65.0, 75.0, 11, 0)),
        vec![
            AlertKind::Cpu,
            AlertKind::Memory,
            AlertKind::Storage,
            AlertKind::NetworkSent
        ]
    );
    assert!(policy.evaluate(&sample(50.0, 60.0, 70.0, 10, 0)).is_empty());
}

#[test]
fn threshold_edges_are_accepted() {
    assert!(ThresholdSet::new(0.0, 100.0, 0.0, 0).is_ok());
}

#[test]
fn invalid_thresholds_are_rejected() {
    let err = ThresholdSet::new(f64::NAN, 90.0, 90.0, 0).expect_err("NaN");
    assert!(matches!(err, ConfigError::ThresholdOutOfRange { name: "cpu", .. }));

    let err = ThresholdSet::new(90.0, 100.01, 90.0, 0).expect_err("above 100");
    assert!(matches!(err, ConfigError::ThresholdOutOfRange { name: "memory", .. }));

    let err = ThresholdSet::new(90.0, 90.0, -1.0, 0).expect_err("negative");
    assert!(matches!(err, ConfigError::ThresholdOutOfRange { name: "storage", .. }));
}

#[test]
fn fixture_alerts_follow_the_readings() {
    let policy = default_policy();
    let samples = load_fixture("busy_host.json");
    assert_eq!(samples.len(), 4);

    let per_sample: Vec<Vec<AlertKind>> = samples.iter().map(|s| kinds(&policy, s)).collect();
    assert_eq!(
        per_sample,
        vec![
            vec![],
            vec![AlertKind::Cpu],
            // 1_000_000 bytes sent is exactly the limit
            vec![AlertKind::Cpu, AlertKind::Memory],
            vec![AlertKind::Memory, AlertKind::Storage, AlertKind::NetworkSent],
        ]
    );
}

#[test]
fn fixture_summary_detects_high_memory() {
    let samples = load_fixture("busy_host.json");
    let summary = Summary::from_samples(&samples, &ThresholdSet::default());
    assert_eq!(summary.sample_count, 4);
    assert!(summary.high_memory_detected);
    assert_eq!(summary.max_memory_percent, Some(94.6));
    assert_eq!(summary.max_cpu_percent, Some(97.8));
    assert_eq!(summary.max_storage_percent, Some(92.3));
}
