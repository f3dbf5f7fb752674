pub mod monitor_state;
pub mod strictness;
pub mod thresholds;

pub use monitor_state::MonitorState;
pub use strictness::PercentStrictness;
pub use thresholds::ThresholdSet;
