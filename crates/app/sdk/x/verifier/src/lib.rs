//! Verification-only signature checks.
//!
//! [`SignatureVerifier`] recovers the signer of a [`Payload`] and records an
//! audit event for every successful recovery made in an exec context. Under a
//! query nothing is recorded, so every method also works as a read-only view.
//! The free functions [`recover`] and [`matches`] do the same work without an
//! environment.

use alloy_primitives::{Address, B256};
use borsh::{BorshDeserialize, BorshSerialize};
use vouch_core::encoding::Encodable;
use vouch_core::{AccountId, Environment, SdkResult};
use vouch_signature::recover_signer;

pub use vouch_signature::{Payload, Scheme};

pub const SIGNER_RECOVERED_EVENT: &str = "signer_recovered";

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SignerRecovered {
    pub signer: AccountId,
    pub scheme: Scheme,
}

/// Recovers the signer of `payload`.
pub fn recover(payload: &Payload, signature: &[u8]) -> SdkResult<Address> {
    recover_signer(payload.digest(), signature)
}

/// Whether `signature` over `payload` was made by `expected`.
///
/// Malformed signatures do not match anyone.
pub fn matches(payload: &Payload, signature: &[u8], expected: Address) -> bool {
    recover(payload, signature).is_ok_and(|signer| signer == expected)
}

/// Stateless verifier run inside an account.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignatureVerifier;

impl SignatureVerifier {
    pub const fn new() -> Self {
        Self
    }

    /// Recovers the signer of `payload` and emits [`SIGNER_RECOVERED_EVENT`]
    /// outside queries.
    pub fn recover_signer(
        &self,
        payload: &Payload,
        signature: &[u8],
        env: &mut dyn Environment,
    ) -> SdkResult<Address> {
        let signer = recover(payload, signature)?;
        self.record(signer, payload.scheme(), env)?;
        Ok(signer)
    }

    /// Checks `signature` over `payload` against `expected`.
    ///
    /// A signature that cannot be recovered yields `Ok(false)`; only host
    /// failures surface as errors.
    pub fn verify(
        &self,
        payload: &Payload,
        signature: &[u8],
        expected: Address,
        env: &mut dyn Environment,
    ) -> SdkResult<bool> {
        match recover(payload, signature) {
            Ok(signer) => {
                self.record(signer, payload.scheme(), env)?;
                Ok(signer == expected)
            }
            Err(err) => {
                tracing::debug!(scheme = %payload.scheme(), error = %err, "unrecoverable signature");
                Ok(false)
            }
        }
    }

    pub fn recover_eth_sign_signer(
        &self,
        hash: B256,
        signature: &[u8],
        env: &mut dyn Environment,
    ) -> SdkResult<Address> {
        self.recover_signer(&Payload::EthSign(hash), signature, env)
    }

    pub fn verify_eth_sign(
        &self,
        hash: B256,
        signature: &[u8],
        expected: Address,
        env: &mut dyn Environment,
    ) -> SdkResult<bool> {
        self.verify(&Payload::EthSign(hash), signature, expected, env)
    }

    pub fn recover_personal_sign_signer(
        &self,
        message: &[u8],
        signature: &[u8],
        env: &mut dyn Environment,
    ) -> SdkResult<Address> {
        self.recover_signer(&Payload::Personal(message.to_vec()), signature, env)
    }

    pub fn verify_personal_sign(
        &self,
        message: &[u8],
        signature: &[u8],
        expected: Address,
        env: &mut dyn Environment,
    ) -> SdkResult<bool> {
        self.verify(&Payload::Personal(message.to_vec()), signature, expected, env)
    }

    fn record(&self, signer: Address, scheme: Scheme, env: &mut dyn Environment) -> SdkResult<()> {
        if env.is_query() {
            return Ok(());
        }
        let event = SignerRecovered {
            signer: AccountId::from(signer),
            scheme,
        };
        env.emit_event(SIGNER_RECOVERED_EVENT, &event.encode()?)?;
        tracing::debug!(%signer, %scheme, "signer recovered");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;
    use vouch_signature::error::{ERR_RECOVERY_ID, ERR_SIGNATURE_LENGTH};
    use vouch_testing::{MockEnv, TestSigner};

    fn env() -> MockEnv {
        MockEnv::new(AccountId::from_u128(0x5E), AccountId::from_u128(1))
    }

    #[test]
    fn test_recover_emits_audit_event() {
        let signer = TestSigner::from_seed(11);
        let hash = keccak256(b"Hello, Ethereum!");
        let mut env = env();

        let recovered = SignatureVerifier::new()
            .recover_eth_sign_signer(hash, &signer.sign_eth(hash), &mut env)
            .unwrap();

        assert_eq!(recovered, signer.address());
        let events: Vec<_> = env.events_named(SIGNER_RECOVERED_EVENT).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].decode::<SignerRecovered>().unwrap(),
            SignerRecovered {
                signer: signer.account(),
                scheme: Scheme::EthSign,
            }
        );
    }

    #[test]
    fn test_failed_recovery_emits_nothing() {
        let mut env = env();
        let err = SignatureVerifier::new()
            .recover_personal_sign_signer(b"hi", &[0u8; 10], &mut env)
            .unwrap_err();

        assert_eq!(err, ERR_SIGNATURE_LENGTH.with_arg(10));
        assert!(env.events().is_empty());
    }

    #[test]
    fn test_verify_false_on_malformed_signature() {
        let signer = TestSigner::from_seed(11);
        let mut sig = signer.sign_personal(b"hi");
        sig[64] = 5;
        let mut env = env();

        assert_eq!(
            recover(&Payload::Personal(b"hi".to_vec()), &sig),
            Err(ERR_RECOVERY_ID.with_arg(5))
        );
        assert!(!SignatureVerifier::new()
            .verify_personal_sign(b"hi", &sig, signer.address(), &mut env)
            .unwrap());
        assert!(env.events().is_empty());
    }

    #[test]
    fn test_matches_is_pure() {
        let signer = TestSigner::from_seed(12);
        let payload = Payload::Personal(b"pure".to_vec());
        let sig = signer.sign_personal(b"pure");

        assert!(matches(&payload, &sig, signer.address()));
        assert!(!matches(&payload, &sig, Address::ZERO));
        assert!(!matches(&payload, &[], signer.address()));
    }
}
