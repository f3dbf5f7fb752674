pub mod monitor;
pub mod sampling;
