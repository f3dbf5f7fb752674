pub mod sampler;
pub mod sink;

pub use sampler::{Sampler, SamplerError};
pub use sink::{AlertSink, NotificationError, SinkEvent};
