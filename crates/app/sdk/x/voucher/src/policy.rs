use crate::authorities::AuthorityRegistry;
use crate::claim::Claim;
use crate::error::{ERR_ALREADY_REDEEMED, ERR_INVALID_SIGNATURE, ERR_WRONG_REDEEMER};
use crate::replay::ReplayGuard;
use alloy_primitives::Address;
use vouch_core::{ensure, AccountId, Environment, SdkResult};
use vouch_signature::{recover_signer, DomainContext};

/// Decides whether a claim may be redeemed by a caller.
///
/// Checks run in a fixed order and stop at the first violation:
/// 1. the authority is the one registered for the claim's asset (or the
///    status issuer) and the signature recovers to it
/// 2. the caller is the claim's recipient
/// 3. the claim has not been redeemed
pub struct AuthorizationPolicy {
    domain: DomainContext,
    default_asset: AccountId,
    authorities: AuthorityRegistry,
}

impl AuthorizationPolicy {
    pub fn new(
        domain: DomainContext,
        default_asset: AccountId,
        authorities: AuthorityRegistry,
    ) -> Self {
        Self {
            domain,
            default_asset,
            authorities,
        }
    }

    pub fn domain(&self) -> &DomainContext {
        &self.domain
    }

    pub fn default_asset(&self) -> AccountId {
        self.default_asset
    }

    pub fn authorities(&self) -> &AuthorityRegistry {
        &self.authorities
    }

    /// The address that signed `claim` under this policy's domain.
    ///
    /// Malformed signatures report [`ERR_INVALID_SIGNATURE`] carrying the
    /// recovery error id as `arg`.
    pub fn recover_claim_signer(&self, claim: &Claim) -> SdkResult<Address> {
        recover_signer(claim.digest(&self.domain), &claim.signature)
            .map_err(|err| ERR_INVALID_SIGNATURE.with_arg(err.id))
    }

    pub fn authorize(
        &self,
        claim: &Claim,
        authority: AccountId,
        caller: AccountId,
        guard: &ReplayGuard,
        env: &dyn Environment,
    ) -> SdkResult<()> {
        let signer = self.recover_claim_signer(claim)?;
        let expected = self
            .authorities
            .expected_for(&claim.value, self.default_asset, env)?;
        ensure!(
            expected == Some(authority) && signer == authority.to_address(),
            ERR_INVALID_SIGNATURE
        );
        ensure!(caller == claim.recipient, ERR_WRONG_REDEEMER);
        ensure!(!guard.is_used(claim.claim_id, env)?, ERR_ALREADY_REDEEMED);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::claim::{ClaimId, ClaimValue};
    use alloy_primitives::U256;
    use vouch_signature::error::ERR_SIGNATURE_LENGTH;
    use vouch_testing::{MockEnv, TestDomain, TestSigner};

    const VOUCHER: AccountId = AccountId::from_u128(0x0F);
    const USD: AccountId = AccountId::from_u128(1000);
    const RECIPIENT: AccountId = AccountId::from_u128(0xBEEF);
    const STRANGER: AccountId = AccountId::from_u128(0xDEAD);

    struct Fixture {
        policy: AuthorizationPolicy,
        guard: ReplayGuard,
        authority: TestSigner,
        env: MockEnv,
    }

    fn fixture() -> Fixture {
        let authority = TestSigner::from_seed(1);
        let registry = AuthorityRegistry::new(1, 2);
        let mut env = MockEnv::new(VOUCHER, RECIPIENT);
        registry
            .initialize(
                &[(USD, authority.account())],
                Some(authority.account()),
                &mut env,
            )
            .unwrap();

        Fixture {
            policy: AuthorizationPolicy::new(
                DomainContext::with_defaults(31337, VOUCHER.to_address()),
                USD,
                registry,
            ),
            guard: ReplayGuard::new(0),
            authority,
            env,
        }
    }

    fn signed_claim(signer: &TestSigner, id: u64, amount: u128) -> Claim {
        let wallet = TestDomain::new(31337, VOUCHER.to_address());
        Claim {
            claim_id: ClaimId::from(id),
            recipient: RECIPIENT,
            value: ClaimValue::Amount(amount),
            signature: signer.sign_voucher(
                &wallet,
                RECIPIENT.to_address(),
                U256::from(id),
                U256::from(amount),
            ),
        }
    }

    #[test]
    fn test_valid_claim_is_authorized() {
        let f = fixture();
        let claim = signed_claim(&f.authority, 1, 100);

        assert_eq!(
            f.policy.recover_claim_signer(&claim),
            Ok(f.authority.address())
        );
        assert!(f
            .policy
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .is_ok());
    }

    #[test]
    fn test_signature_checked_before_caller() {
        let f = fixture();
        let forged = signed_claim(&TestSigner::from_seed(2), 1, 100);

        let err = f
            .policy
            .authorize(&forged, f.authority.account(), STRANGER, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_INVALID_SIGNATURE);
    }

    #[test]
    fn test_caller_checked_before_replay() {
        let mut f = fixture();
        let claim = signed_claim(&f.authority, 1, 100);
        f.guard.mark_used(claim.claim_id, &mut f.env).unwrap();

        let err = f
            .policy
            .authorize(&claim, f.authority.account(), STRANGER, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_WRONG_REDEEMER);

        let err = f
            .policy
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_ALREADY_REDEEMED);
    }

    #[test]
    fn test_tampered_amount_fails_signature() {
        let f = fixture();
        let mut claim = signed_claim(&f.authority, 1, 100);
        claim.value = ClaimValue::Amount(1_000);

        let err = f
            .policy
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_INVALID_SIGNATURE);
    }

    #[test]
    fn test_malformed_signature_maps_to_invalid_signature() {
        let f = fixture();
        let mut claim = signed_claim(&f.authority, 1, 100);
        claim.signature.truncate(64);

        let err = f
            .policy
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .unwrap_err();
        assert!(err.is(ERR_INVALID_SIGNATURE));
        assert_eq!(err.arg(), ERR_SIGNATURE_LENGTH.id);
    }

    #[test]
    fn test_other_domain_rejected() {
        let f = fixture();
        let wallet = TestDomain::new(1, VOUCHER.to_address());
        let claim = Claim {
            signature: f.authority.sign_voucher(
                &wallet,
                RECIPIENT.to_address(),
                U256::from(1),
                U256::from(100),
            ),
            ..signed_claim(&f.authority, 1, 100)
        };

        let err = f
            .policy
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_INVALID_SIGNATURE);
    }

    #[test]
    fn test_unregistered_signer_rejected_before_replay() {
        let mut f = fixture();
        let outsider = TestSigner::from_seed(99);
        let claim = signed_claim(&outsider, 1, 0);
        f.guard.mark_used(claim.claim_id, &mut f.env).unwrap();

        assert_eq!(
            f.policy.recover_claim_signer(&claim),
            Ok(outsider.address())
        );
        let err = f
            .policy
            .authorize(&claim, outsider.account(), RECIPIENT, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_INVALID_SIGNATURE);
    }

    #[test]
    fn test_status_issuer_required_for_status_claims() {
        let f = fixture();
        let claim = Claim {
            claim_id: ClaimId::from(2u64),
            recipient: RECIPIENT,
            value: ClaimValue::Status,
            signature: f.authority.sign_status_voucher(
                &TestDomain::new(31337, VOUCHER.to_address()),
                RECIPIENT.to_address(),
                U256::from(2),
            ),
        };
        assert!(f
            .policy
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .is_ok());

        let unissued = AuthorizationPolicy::new(
            f.policy.domain().clone(),
            USD,
            AuthorityRegistry::new(3, 4),
        );
        let err = unissued
            .authorize(&claim, f.authority.account(), RECIPIENT, &f.guard, &f.env)
            .unwrap_err();
        assert_eq!(err, ERR_INVALID_SIGNATURE);
    }
}
