//! Signature-authorized, one-time voucher redemption.
//!
//! An authority signs a [`Claim`] off-system as EIP-712 typed data. The
//! recipient submits it to [`Voucher::redeem`], which checks the signature
//! against the authorities registered at initialization, the caller and the
//! replay record, then marks the claim used and settles it on a
//! [`ValueLedger`] as one atomic unit.

pub mod authorities;
pub mod claim;
pub mod error;
pub mod policy;
pub mod replay;

pub use authorities::AuthorityRegistry;
pub use claim::{Claim, ClaimId, ClaimValue};
pub use error::{
    RedeemFailure, ERR_ALREADY_INITIALIZED, ERR_ALREADY_REDEEMED, ERR_INVALID_SIGNATURE,
    ERR_LEDGER_FAILURE, ERR_WRONG_REDEEMER,
};
pub use policy::AuthorizationPolicy;
pub use replay::ReplayGuard;

use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use vouch_core::encoding::Encodable;
use vouch_core::low_level::atomically;
use vouch_core::{ensure, AccountId, Environment, SdkResult};
use vouch_signature::DomainContext;
use vouch_value_ledger::ValueLedger;

pub const VOUCHER_REDEEMED_EVENT: &str = "voucher_redeemed";

/// Payload of the [`VOUCHER_REDEEMED_EVENT`].
///
/// `asset` and `amount` are `None` for status claims.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoucherRedeemed {
    pub claim_id: ClaimId,
    pub recipient: AccountId,
    pub asset: Option<AccountId>,
    pub amount: Option<u128>,
}

/// Outcome of a successful redemption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redemption {
    pub claim_id: ClaimId,
    pub recipient: AccountId,
    pub value: ClaimValue,
}

/// Redemption entry point, run as the voucher account.
///
/// `default_asset` settles [`ClaimValue::Amount`] claims.
pub struct Voucher<L> {
    policy: AuthorizationPolicy,
    guard: ReplayGuard,
    ledger: L,
}

impl<L: ValueLedger> Voucher<L> {
    pub fn new(domain: DomainContext, default_asset: AccountId, ledger: L) -> Self {
        Self {
            policy: AuthorizationPolicy::new(domain, default_asset, AuthorityRegistry::new(1, 2)),
            guard: ReplayGuard::new(0),
            ledger,
        }
    }

    pub fn with_guard(self, guard: ReplayGuard) -> Self {
        Self { guard, ..self }
    }

    /// Registers the authority for each asset, as `(asset, authority)`, and
    /// the issuer of status claims. Can only run once per voucher account.
    pub fn initialize(
        &self,
        asset_authorities: &[(AccountId, AccountId)],
        status_issuer: Option<AccountId>,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        self.policy
            .authorities()
            .initialize(asset_authorities, status_issuer, env)
    }

    /// Redeems `claim` for the caller (`env.sender()`).
    ///
    /// On error nothing is written: the replay mark and any partial ledger
    /// write are rolled back together.
    pub fn redeem(
        &self,
        claim: &Claim,
        authority: AccountId,
        env: &mut dyn Environment,
    ) -> SdkResult<Redemption> {
        let caller = env.sender();
        if let Err(err) = self
            .policy
            .authorize(claim, authority, caller, &self.guard, env)
        {
            tracing::debug!(
                claim_id = %claim.claim_id,
                %caller,
                failure = ?RedeemFailure::classify(err),
                "voucher rejected"
            );
            return Err(err);
        }

        let event = atomically(env, |env| {
            ensure!(
                self.guard.mark_used(claim.claim_id, env)?,
                ERR_ALREADY_REDEEMED
            );
            let event = self.settle(claim, authority, env)?;
            env.emit_event(VOUCHER_REDEEMED_EVENT, &event.encode()?)?;
            Ok(event)
        })
        .inspect_err(|err| {
            tracing::debug!(
                claim_id = %claim.claim_id,
                failure = ?RedeemFailure::classify(*err),
                ledger_error = err.arg(),
                "voucher settlement failed"
            );
        })?;

        tracing::info!(
            claim_id = %event.claim_id,
            recipient = %event.recipient,
            amount = ?event.amount,
            "voucher redeemed"
        );
        Ok(Redemption {
            claim_id: claim.claim_id,
            recipient: claim.recipient,
            value: claim.value.clone(),
        })
    }

    fn settle(
        &self,
        claim: &Claim,
        authority: AccountId,
        env: &mut dyn Environment,
    ) -> SdkResult<VoucherRedeemed> {
        let (asset, amount) = match claim.value {
            ClaimValue::Status => {
                self.ledger
                    .record_status(claim.claim_id.to_be_bytes(), claim.recipient, env)
                    .map_err(|err| ERR_LEDGER_FAILURE.with_arg(err.id))?;
                (None, None)
            }
            ClaimValue::Amount(amount) => {
                let asset = self.policy.default_asset();
                self.transfer(asset, authority, claim.recipient, amount, env)?;
                (Some(asset), Some(amount))
            }
            ClaimValue::AssetAmount { asset, amount } => {
                self.transfer(asset, authority, claim.recipient, amount, env)?;
                (Some(asset), Some(amount))
            }
        };
        Ok(VoucherRedeemed {
            claim_id: claim.claim_id,
            recipient: claim.recipient,
            asset,
            amount,
        })
    }

    fn transfer(
        &self,
        asset: AccountId,
        from_pool: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        self.ledger
            .transfer_on_behalf(asset, from_pool, to, amount, env)
            .map_err(|err| ERR_LEDGER_FAILURE.with_arg(err.id))
    }

    pub fn is_redeemed(&self, claim_id: ClaimId, env: &dyn Environment) -> SdkResult<bool> {
        self.guard.is_used(claim_id, env)
    }

    pub fn domain(&self) -> &DomainContext {
        self.policy.domain()
    }

    pub fn domain_separator(&self) -> B256 {
        self.policy.domain().separator()
    }

    /// The digest the authority has to sign for `claim` to redeem here.
    pub fn claim_digest(&self, claim: &Claim) -> B256 {
        claim.digest(self.policy.domain())
    }

    pub fn default_asset(&self) -> AccountId {
        self.policy.default_asset()
    }

    /// The authority whose signature redeems a claim carrying `value`, if any.
    pub fn authority_for(
        &self,
        value: &ClaimValue,
        env: &dyn Environment,
    ) -> SdkResult<Option<AccountId>> {
        self.policy
            .authorities()
            .expected_for(value, self.policy.default_asset(), env)
    }
}
