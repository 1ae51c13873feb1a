//! Observability setup for vouch tools.

pub mod logging;

pub use logging::{init_tracing, init_tracing_from_config, LogFormat, LOG_LEVELS};
