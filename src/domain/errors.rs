use thiserror::Error;

/// Invalid configuration detected while building the monitor.
///
/// Raised at construction time only; a running monitor never produces it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} threshold must be within 0-100, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}
