//! The ledger contract a redemption settles through.
//!
//! Implementations are called from the redeeming account's frame, so the
//! ledger sees that account as the sender of every request.

use vouch_core::{AccountId, Environment, SdkResult};

/// Big-endian bytes of a 256-bit claim id.
pub type ClaimKey = [u8; 32];

pub trait ValueLedger {
    /// Moves `amount` of `asset` from `from_pool` to `to`, spending the
    /// allowance `from_pool` granted to the caller.
    ///
    /// Fails without side effects on insufficient balance or allowance.
    fn transfer_on_behalf(
        &self,
        asset: AccountId,
        from_pool: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()>;

    /// Records that `recipient` holds the status granted by `claim_id`.
    fn record_status(
        &self,
        claim_id: ClaimKey,
        recipient: AccountId,
        env: &mut dyn Environment,
    ) -> SdkResult<()>;
}
