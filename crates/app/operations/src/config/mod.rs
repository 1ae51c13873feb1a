//! Configuration loading and validation.
//!
//! This module provides:
//! - Configuration types with serde support
//! - YAML file loading
//! - Validation that collects all errors

mod loader;
pub mod types;
mod validation;

pub use loader::{load_config, load_config_from_str};
pub use types::{DomainConfig, ObservabilityConfig, VouchConfig};
pub use validation::validate_config;

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "vouch.yaml";
