//! Voucher tool (vouch)
//!
//! Computes the digest an authority signs for a claim and checks signatures
//! offline. It never signs anything itself.
//!
//! ## Usage
//!
//! ```bash
//! # Digest for claim 1 paying 100 to a recipient, domain from vouch.yaml
//! vouch digest --id 1 --recipient 0x... --amount 100
//!
//! # Same, domain given on the command line
//! vouch digest --id 1 --recipient 0x... --amount 100 \
//!     --chain-id 31337 --verifying-contract 0x...
//!
//! # Who signed a personal message?
//! vouch recover --scheme personal --message "Hello, World!" --signature 0x...
//!
//! # Did 0x... sign this eth_sign hash?
//! vouch verify --scheme eth-sign --hash 0x... --signature 0x... --expected 0x...
//!
//! # Validate the config file
//! vouch config check
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod domain;
mod payload;

use std::path::{Path, PathBuf};

use alloy_primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use vouch_core::{AccountId, ErrorCode};
use vouch_operations::config::load_config;
use vouch_operations::{
    init_tracing, ConfigError, LogFormat, ObservabilityError, VouchConfig, DEFAULT_CONFIG_PATH,
};
use vouch_signature::DomainContext;
use vouch_voucher::{Claim, ClaimId, ClaimValue};

use crate::domain::{load_optional_config, resolve_domain, DomainArgs};
use crate::payload::PayloadArgs;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error("missing domain field '{0}': set it in the config file or pass it as a flag")]
    MissingDomain(&'static str),

    #[error("missing argument {0}")]
    MissingArgument(&'static str),

    #[error("signature recovery failed: {0}")]
    Recovery(ErrorCode),
}

#[derive(Parser)]
#[command(name = "vouch")]
#[command(about = "Voucher digests and offline signature verification")]
#[command(version)]
struct Cli {
    /// Config YAML path (defaults to ./vouch.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the structured-data digest an authority signs for a claim
    Digest(DigestArgs),
    /// Recover the signer of a payload
    Recover(PayloadArgs),
    /// Check a payload's signature against an expected signer
    Verify(VerifyArgs),
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Load and validate the config file, reporting every problem
    Check,
}

#[derive(Debug, Clone, Args)]
struct DigestArgs {
    /// Claim id (decimal or 0x-prefixed hex)
    #[arg(long)]
    id: U256,

    /// Recipient address
    #[arg(long)]
    recipient: Address,

    /// Amount; omit for a status claim
    #[arg(long)]
    amount: Option<u128>,

    /// Asset address; omit to use the voucher's default asset
    #[arg(long, requires = "amount")]
    asset: Option<Address>,

    #[command(flatten)]
    domain: DomainArgs,
}

#[derive(Debug, Clone, Args)]
struct VerifyArgs {
    #[command(flatten)]
    payload: PayloadArgs,

    /// Address expected to have signed
    #[arg(long)]
    expected: Address,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{output:#}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Value, CliError> {
    let config = load_optional_config(cli.config.as_deref())?;
    init_logging(config.as_ref(), cli.log_level.as_deref())?;

    match cli.command {
        Commands::Digest(args) => {
            let domain = resolve_domain(config.as_ref(), &args.domain)?;
            Ok(digest(&args, &domain))
        }
        Commands::Recover(args) => recover(&args),
        Commands::Verify(args) => verify(&args),
        Commands::Config(ConfigCommand::Check) => config_check(
            cli.config
                .as_deref()
                .unwrap_or(Path::new(DEFAULT_CONFIG_PATH)),
        ),
    }
}

fn init_logging(config: Option<&VouchConfig>, level: Option<&str>) -> Result<(), CliError> {
    let observability = config.map(|c| c.observability.clone()).unwrap_or_default();
    let level = level.unwrap_or(&observability.log_level);
    let format = observability.log_format.parse().unwrap_or(LogFormat::Pretty);
    init_tracing(level, format)?;
    Ok(())
}

fn claim_from_args(args: &DigestArgs) -> Claim {
    let value = match (args.amount, args.asset) {
        (Some(amount), Some(asset)) => ClaimValue::AssetAmount {
            asset: AccountId::from(asset),
            amount,
        },
        (Some(amount), None) => ClaimValue::Amount(amount),
        (None, _) => ClaimValue::Status,
    };
    Claim {
        claim_id: ClaimId::from(args.id),
        recipient: AccountId::from(args.recipient),
        value,
        signature: vec![],
    }
}

fn digest(args: &DigestArgs, domain: &DomainContext) -> Value {
    let claim = claim_from_args(args);
    let digest = claim.digest(domain);
    tracing::debug!(claim_id = %claim.claim_id, %digest, "claim digest computed");

    json!({
        "claim_id": claim.claim_id.to_string(),
        "recipient": args.recipient,
        "value": match claim.value {
            ClaimValue::Status => json!({ "kind": "status" }),
            ClaimValue::Amount(amount) => json!({ "kind": "amount", "amount": amount.to_string() }),
            ClaimValue::AssetAmount { asset, amount } => json!({
                "kind": "asset_amount",
                "asset": asset.to_address(),
                "amount": amount.to_string(),
            }),
        },
        "domain": domain_json(domain),
        "domain_separator": domain.separator(),
        "struct_hash": claim.struct_hash(),
        "digest": digest,
    })
}

fn recover(args: &PayloadArgs) -> Result<Value, CliError> {
    let payload = args.to_payload()?;
    let signer = vouch_verifier::recover(&payload, &args.signature).map_err(CliError::Recovery)?;
    Ok(json!({
        "scheme": payload.scheme().to_string(),
        "digest": payload.digest(),
        "signer": signer,
    }))
}

fn verify(args: &VerifyArgs) -> Result<Value, CliError> {
    let payload = args.payload.to_payload()?;
    let signer = vouch_verifier::recover(&payload, &args.payload.signature).ok();
    let valid = signer == Some(args.expected);
    tracing::debug!(scheme = %payload.scheme(), valid, "signature checked");

    Ok(json!({
        "scheme": payload.scheme().to_string(),
        "digest": payload.digest(),
        "expected": args.expected,
        "signer": signer,
        "valid": valid,
    }))
}

fn config_check(path: &Path) -> Result<Value, CliError> {
    let config = load_config(path)?;
    let domain = config.domain.to_domain_context();
    Ok(json!({
        "ok": true,
        "path": path.display().to_string(),
        "domain": domain_json(&domain),
        "domain_separator": domain.separator(),
        "observability": {
            "log_level": config.observability.log_level,
            "log_format": config.observability.log_format,
        },
    }))
}

fn domain_json(domain: &DomainContext) -> Value {
    json!({
        "name": domain.name,
        "version": domain.version,
        "chain_id": domain.chain_id,
        "verifying_contract": domain.verifying_contract,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::payload::SchemeArg;
    use alloy_primitives::{keccak256, Bytes, B256};
    use std::io::Write;
    use vouch_testing::{TestDomain, TestSigner};

    fn digest_args(amount: Option<u128>, asset: Option<Address>) -> DigestArgs {
        DigestArgs {
            id: U256::from(1),
            recipient: Address::repeat_byte(0xBE),
            amount,
            asset,
            domain: DomainArgs::default(),
        }
    }

    fn payload_args(scheme: SchemeArg, signature: Vec<u8>) -> PayloadArgs {
        PayloadArgs {
            scheme,
            hash: None,
            message: None,
            message_hex: None,
            domain_separator: None,
            struct_hash: None,
            signature: Bytes::from(signature),
        }
    }

    fn as_b256(value: &Value) -> B256 {
        value.as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_digest_matches_wallet() {
        let contract = Address::repeat_byte(0x0F);
        let domain = DomainContext::with_defaults(31337, contract);
        let wallet = TestDomain::new(31337, contract);
        let expected = wallet.digest(vouch_testing::signer::voucher_struct_hash(
            Address::repeat_byte(0xBE),
            U256::from(1),
            U256::from(100),
        ));

        let output = digest(&digest_args(Some(100), None), &domain);
        assert_eq!(as_b256(&output["digest"]), expected);
        assert_eq!(output["value"]["kind"], "amount");
        assert_eq!(output["claim_id"], "1");
    }

    #[test]
    fn test_claim_value_from_flags() {
        assert_eq!(
            claim_from_args(&digest_args(None, None)).value,
            ClaimValue::Status
        );
        assert_eq!(
            claim_from_args(&digest_args(Some(5), Some(Address::repeat_byte(1)))).value,
            ClaimValue::AssetAmount {
                asset: AccountId::from(Address::repeat_byte(1)),
                amount: 5,
            }
        );
    }

    #[test]
    fn test_recover_and_verify_personal() {
        let signer = TestSigner::from_seed(31);
        let args = PayloadArgs {
            message: Some("Hello, World!".to_string()),
            ..payload_args(SchemeArg::Personal, signer.sign_personal(b"Hello, World!"))
        };

        let recovered = recover(&args).unwrap();
        assert_eq!(recovered["scheme"], "personal");
        assert_eq!(
            recovered["signer"].as_str().unwrap().parse::<Address>().unwrap(),
            signer.address()
        );

        let verified = verify(&VerifyArgs {
            payload: args.clone(),
            expected: signer.address(),
        })
        .unwrap();
        assert_eq!(verified["valid"], true);

        let rejected = verify(&VerifyArgs {
            payload: args,
            expected: Address::ZERO,
        })
        .unwrap();
        assert_eq!(rejected["valid"], false);
    }

    #[test]
    fn test_malformed_signature() {
        let hash = keccak256(b"x");
        let args = PayloadArgs {
            hash: Some(hash),
            ..payload_args(SchemeArg::EthSign, vec![0u8; 3])
        };

        assert!(matches!(recover(&args), Err(CliError::Recovery(_))));
        let verified = verify(&VerifyArgs {
            payload: args,
            expected: Address::ZERO,
        })
        .unwrap();
        assert_eq!(verified["valid"], false);
        assert!(verified["signer"].is_null());
    }

    #[test]
    fn test_config_check_reports_all_problems() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"domain:\n  name: \"\"\n  chain_id: 0\n  verifying_contract: \"0x1111111111111111111111111111111111111111\"\n",
        )
        .unwrap();

        match config_check(file.path()) {
            Err(CliError::Config(ConfigError::ValidationFailed(errors))) => {
                assert_eq!(errors.len(), 2)
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_config_check_ok() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"domain:\n  chain_id: 31337\n  verifying_contract: \"0x000000000000000000000000000000000000000f\"\n",
        )
        .unwrap();

        let output = config_check(file.path()).unwrap();
        assert_eq!(output["ok"], true);
        assert_eq!(
            as_b256(&output["domain_separator"]),
            DomainContext::with_defaults(31337, Address::with_last_byte(0x0f)).separator()
        );
    }
}
