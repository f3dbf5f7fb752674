use serde::{Deserialize, Serialize};

/// Lifecycle of the monitoring loop: `Idle` → `Running` → `Stopped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    /// Not started yet
    #[default]
    Idle,
    /// Sampling on a fixed cadence
    Running,
    /// Terminated, no further sampling
    Stopped,
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}
