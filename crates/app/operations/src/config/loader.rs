//! Configuration file loading.

use crate::config::types::VouchConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::path::Path;

/// Load and validate configuration from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is invalid
/// - Any configuration value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<VouchConfig, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    load_config_from_str(&content, &path_str)
}

/// Load and validate configuration from a YAML string.
pub fn load_config_from_str(content: &str, source_name: &str) -> Result<VouchConfig, ConfigError> {
    let config: VouchConfig = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: source_name.to_string(),
        source: e,
    })?;

    validate_config(&config)?;
    tracing::debug!(source = source_name, chain_id = config.domain.chain_id, "config loaded");

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use std::io::Write;

    const VALID_CONFIG: &str = r#"
domain:
  name: "MyEIP712App"
  version: "1"
  chain_id: 31337
  verifying_contract: "0x000000000000000000000000000000000000000f"

observability:
  log_level: "debug"
  log_format: "json"
"#;

    #[test]
    fn test_load_valid_config() {
        let config = load_config_from_str(VALID_CONFIG, "vouch.yaml").unwrap();
        assert_eq!(config.domain.chain_id, 31337);
        assert_eq!(
            config.domain.verifying_contract,
            Address::with_last_byte(0x0f)
        );
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn test_defaults_applied() {
        let minimal = r#"
domain:
  chain_id: 1
  verifying_contract: "0x1111111111111111111111111111111111111111"
"#;
        let config = load_config_from_str(minimal, "vouch.yaml").unwrap();

        assert_eq!(config.domain.name, "MyEIP712App");
        assert_eq!(config.domain.version, "1");
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let with_unknown = r#"
domain:
  chain_id: 1
  verifying_contract: "0x1111111111111111111111111111111111111111"
  salt: "0x00"
"#;
        let result = load_config_from_str(with_unknown, "vouch.yaml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_bad_address_is_parse_error() {
        let bad_address = r#"
domain:
  chain_id: 1
  verifying_contract: "0x1234"
"#;
        let result = load_config_from_str(bad_address, "vouch.yaml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let invalid = r#"
domain:
  chain_id: 0
  verifying_contract: "0x0000000000000000000000000000000000000000"
"#;
        match load_config_from_str(invalid, "vouch.yaml") {
            Err(ConfigError::ValidationFailed(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("Expected ValidationFailed error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.domain.chain_id, 31337);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
