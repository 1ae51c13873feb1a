//! Command-line description of what was signed.

use alloy_primitives::{Bytes, B256};
use clap::{Args, ValueEnum};
use vouch_verifier::Payload;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    /// 32-byte digest signed as-is
    Raw,
    /// 32-byte hash signed with the eth_sign prefix
    EthSign,
    /// Message signed with the personal_sign prefix
    Personal,
    /// EIP-712 struct hash under a domain separator
    Typed,
}

#[derive(Debug, Clone, Args)]
pub struct PayloadArgs {
    /// How the signed digest was derived
    #[arg(long, value_enum)]
    pub scheme: SchemeArg,

    /// 32-byte hash (raw, eth-sign)
    #[arg(long)]
    pub hash: Option<B256>,

    /// UTF-8 message (personal)
    #[arg(long, conflicts_with = "message_hex")]
    pub message: Option<String>,

    /// Hex-encoded message bytes (personal)
    #[arg(long)]
    pub message_hex: Option<Bytes>,

    /// Domain separator (typed)
    #[arg(long)]
    pub domain_separator: Option<B256>,

    /// Struct hash (typed)
    #[arg(long)]
    pub struct_hash: Option<B256>,

    /// 65-byte `r || s || v` signature, hex
    #[arg(long)]
    pub signature: Bytes,
}

impl PayloadArgs {
    pub fn to_payload(&self) -> Result<Payload, CliError> {
        Ok(match self.scheme {
            SchemeArg::Raw => Payload::Digest(required(self.hash, "--hash")?),
            SchemeArg::EthSign => Payload::EthSign(required(self.hash, "--hash")?),
            SchemeArg::Personal => match (&self.message, &self.message_hex) {
                (Some(text), _) => Payload::Personal(text.as_bytes().to_vec()),
                (None, Some(bytes)) => Payload::Personal(bytes.to_vec()),
                (None, None) => return Err(CliError::MissingArgument("--message")),
            },
            SchemeArg::Typed => Payload::Typed {
                domain_separator: required(self.domain_separator, "--domain-separator")?,
                struct_hash: required(self.struct_hash, "--struct-hash")?,
            },
        })
    }
}

fn required<T>(value: Option<T>, flag: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument(flag))
}
