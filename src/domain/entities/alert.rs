use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric that crossed its threshold.
///
/// Declaration order is the order in which alerts are emitted for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    Cpu,
    Memory,
    Storage,
    NetworkSent,
}

impl AlertKind {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Cpu => "High CPU Usage Alert",
            Self::Memory => "High Memory Usage Alert",
            Self::Storage => "High Storage Usage Alert",
            Self::NetworkSent => "High Network Usage Alert",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "CPU"),
            Self::Memory => write!(f, "MEMORY"),
            Self::Storage => write!(f, "STORAGE"),
            Self::NetworkSent => write!(f, "NETWORK"),
        }
    }
}

/// A threshold breach detected on one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub measured_value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Human-readable description of the breach.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            AlertKind::Cpu => format!("CPU usage is {:.1}%.", self.measured_value),
            AlertKind::Memory => format!("Memory usage is {:.1}%.", self.measured_value),
            AlertKind::Storage => format!("Storage usage is {:.1}%.", self.measured_value),
            AlertKind::NetworkSent => {
                format!("Network I/O sent: {:.0} bytes.", self.measured_value)
            }
        }
    }
}
