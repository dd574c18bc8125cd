//! Observability setup for dashbot.

pub mod tracing_setup;

pub use tracing_setup::{LogFormat, init_tracing};
