pub mod alert;
pub mod history;
pub mod sample;
pub mod summary;

pub use alert::{Alert, AlertKind};
pub use history::SlidingWindowHistory;
pub use sample::{MetricSample, RangeError};
pub use summary::Summary;
