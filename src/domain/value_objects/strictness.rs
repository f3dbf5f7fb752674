use serde::{Deserialize, Serialize};

/// How out-of-range percentage readings are handled before they reach history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentStrictness {
    /// Clamp readings into 0-100.
    #[default]
    Clamp,
    /// Refuse the whole sample.
    Reject,
}

impl PercentStrictness {
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Reject
        } else {
            Self::Clamp
        }
    }
}

impl std::fmt::Display for PercentStrictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
