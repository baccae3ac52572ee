//! Logging setup for the runner.

mod tracing;

pub use self::tracing::init_tracing;
