pub mod channel;
pub mod composite;
pub mod terminal;
pub mod tracing_sink;
