use crate::digest::{eth_sign_digest, personal_digest, raw_digest, typed_data_digest};
use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;

/// How the signed digest was derived from what the caller holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// The 32 bytes were signed as-is.
    Digest(B256),
    /// A 32-byte hash signed through `eth_sign`.
    EthSign(B256),
    /// An arbitrary message signed through `personal_sign`.
    Personal(Vec<u8>),
    /// An EIP-712 struct under a domain.
    Typed {
        domain_separator: B256,
        struct_hash: B256,
    },
}

impl Payload {
    pub fn digest(&self) -> B256 {
        match self {
            Payload::Digest(hash) => raw_digest(*hash),
            Payload::EthSign(hash) => eth_sign_digest(*hash),
            Payload::Personal(message) => personal_digest(message),
            Payload::Typed {
                domain_separator,
                struct_hash,
            } => typed_data_digest(*domain_separator, *struct_hash),
        }
    }

    pub const fn scheme(&self) -> Scheme {
        match self {
            Payload::Digest(_) => Scheme::Raw,
            Payload::EthSign(_) => Scheme::EthSign,
            Payload::Personal(_) => Scheme::Personal,
            Payload::Typed { .. } => Scheme::Typed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub enum Scheme {
    Raw,
    EthSign,
    Personal,
    Typed,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scheme::Raw => "raw",
            Scheme::EthSign => "eth-sign",
            Scheme::Personal => "personal",
            Scheme::Typed => "typed",
        })
    }
}
