//! Configuration types for vouch tools.

use alloy_primitives::Address;
use serde::Deserialize;
use vouch_signature::domain::{DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};
use vouch_signature::DomainContext;

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VouchConfig {
    /// Structured-data signing domain of the deployment.
    pub domain: DomainConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// The EIP-712 domain claims are signed under.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    /// Domain name. Default: "MyEIP712App".
    #[serde(default = "DomainConfig::default_name")]
    pub name: String,

    /// Domain version. Default: "1".
    #[serde(default = "DomainConfig::default_version")]
    pub version: String,

    /// Network the claims are valid on. Must be > 0.
    pub chain_id: u64,

    /// Address of the voucher account.
    pub verifying_contract: Address,
}

impl DomainConfig {
    fn default_name() -> String {
        DEFAULT_DOMAIN_NAME.to_string()
    }

    fn default_version() -> String {
        DEFAULT_DOMAIN_VERSION.to_string()
    }

    pub fn to_domain_context(&self) -> DomainContext {
        DomainContext::new(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.verifying_contract,
        )
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level: trace, debug, info, warn, error. Default: info.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty. Default: pretty.
    #[serde(default = "ObservabilityConfig::default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: Self::default_log_format(),
        }
    }
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_log_format() -> String {
        "pretty".to_string()
    }
}
