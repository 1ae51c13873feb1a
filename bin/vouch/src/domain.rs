//! Resolves the signing domain from `vouch.yaml` and command-line overrides.

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use clap::Args;
use vouch_operations::config::load_config;
use vouch_operations::{VouchConfig, DEFAULT_CONFIG_PATH};
use vouch_signature::domain::{DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};
use vouch_signature::DomainContext;

use crate::CliError;

#[derive(Debug, Clone, Default, Args)]
pub struct DomainArgs {
    /// Domain name override
    #[arg(long)]
    pub name: Option<String>,

    /// Domain version override
    #[arg(long)]
    pub domain_version: Option<String>,

    /// Chain ID override
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Voucher account address override
    #[arg(long)]
    pub verifying_contract: Option<Address>,
}

/// Loads `path` when it exists. A missing file is only an error when the
/// path was given explicitly.
pub fn load_optional_config(
    path: Option<&Path>,
) -> Result<Option<VouchConfig>, CliError> {
    match path {
        Some(path) => Ok(Some(load_config(path)?)),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Ok(Some(load_config(default)?))
            } else {
                Ok(None)
            }
        }
    }
}

/// Resolve a domain from: defaults < YAML < CLI flags.
pub fn resolve_domain(
    config: Option<&VouchConfig>,
    args: &DomainArgs,
) -> Result<DomainContext, CliError> {
    let file = config.map(|c| &c.domain);

    let chain_id = args
        .chain_id
        .or(file.map(|d| d.chain_id))
        .ok_or(CliError::MissingDomain("chain_id"))?;
    let verifying_contract = args
        .verifying_contract
        .or(file.map(|d| d.verifying_contract))
        .ok_or(CliError::MissingDomain("verifying_contract"))?;
    let name = args
        .name
        .clone()
        .or_else(|| file.map(|d| d.name.clone()))
        .unwrap_or_else(|| DEFAULT_DOMAIN_NAME.to_string());
    let version = args
        .domain_version
        .clone()
        .or_else(|| file.map(|d| d.version.clone()))
        .unwrap_or_else(|| DEFAULT_DOMAIN_VERSION.to_string());

    Ok(DomainContext::new(name, version, chain_id, verifying_contract))
}
