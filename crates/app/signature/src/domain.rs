use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::Eip712Domain;
use std::borrow::Cow;

pub const DEFAULT_DOMAIN_NAME: &str = "MyEIP712App";
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Values bound into every structured-data digest.
///
/// Two deployments that differ in any field never accept each other's
/// signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainContext {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl DomainContext {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// The default name and version on the given chain and contract.
    pub fn with_defaults(chain_id: u64, verifying_contract: Address) -> Self {
        Self::new(
            DEFAULT_DOMAIN_NAME,
            DEFAULT_DOMAIN_VERSION,
            chain_id,
            verifying_contract,
        )
    }

    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    /// `hashStruct(EIP712Domain)`.
    pub fn separator(&self) -> B256 {
        self.to_eip712().separator()
    }
}
