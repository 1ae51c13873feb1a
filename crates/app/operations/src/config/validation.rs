//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning,
//! enabling users to fix multiple issues in a single iteration.

use crate::config::types::{DomainConfig, ObservabilityConfig, VouchConfig};
use crate::errors::ConfigError;
use crate::observability::logging::{LogFormat, LOG_LEVELS};

/// Validate the entire configuration.
///
/// Collects all validation errors and returns them together.
pub fn validate_config(config: &VouchConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_domain_config(&config.domain, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_domain_config(config: &DomainConfig, errors: &mut Vec<String>) {
    if config.name.is_empty() {
        errors.push("domain.name cannot be empty".to_string());
    }

    if config.version.is_empty() {
        errors.push("domain.version cannot be empty".to_string());
    }

    if config.chain_id == 0 {
        errors.push("domain.chain_id must be greater than 0".to_string());
    }

    if config.verifying_contract.is_zero() {
        errors.push("domain.verifying_contract cannot be the zero address".to_string());
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_level '{}' must be one of: {}",
            config.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.log_format.parse::<LogFormat>().is_err() {
        errors.push(format!(
            "observability.log_format '{}' must be 'json' or 'pretty'",
            config.log_format
        ));
    }
}
