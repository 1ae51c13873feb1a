//! Operations infrastructure for vouch tools.
//!
//! - **Config**: YAML configuration with validation that reports every problem
//! - **Observability**: `tracing` subscriber setup, JSON or human-readable
//!
//! # Example
//!
//! ```no_run
//! use vouch_operations::{config::load_config, init_tracing_from_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("vouch.yaml")?;
//!     init_tracing_from_config(&config.observability)?;
//!
//!     let domain = config.domain.to_domain_context();
//!     tracing::info!(separator = %domain.separator(), "domain loaded");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;

pub use config::{load_config, DomainConfig, ObservabilityConfig, VouchConfig, DEFAULT_CONFIG_PATH};
pub use errors::{ConfigError, ObservabilityError};
pub use observability::{init_tracing, init_tracing_from_config, LogFormat};
