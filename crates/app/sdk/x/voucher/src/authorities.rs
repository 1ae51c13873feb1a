use crate::claim::ClaimValue;
use crate::error::ERR_ALREADY_INITIALIZED;
use vouch_collections::item::Item;
use vouch_collections::map::Map;
use vouch_core::{ensure, AccountId, Environment, SdkResult};

/// Signers a voucher account accepts, fixed at initialization.
///
/// Each asset has at most one authority. Status claims are accepted only from
/// the status issuer; without one, no status claim redeems.
pub struct AuthorityRegistry {
    per_asset: Map<AccountId, AccountId>,
    status_issuer: Item<Option<AccountId>>,
}

impl AuthorityRegistry {
    pub const fn new(asset_prefix: u8, status_prefix: u8) -> Self {
        Self {
            per_asset: Map::new(asset_prefix),
            status_issuer: Item::new(status_prefix),
        }
    }

    /// Records the accepted authorities. Later entries for the same asset win.
    pub fn initialize(
        &self,
        asset_authorities: &[(AccountId, AccountId)],
        status_issuer: Option<AccountId>,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        ensure!(
            self.status_issuer.may_get(env)?.is_none(),
            ERR_ALREADY_INITIALIZED
        );
        for (asset, authority) in asset_authorities {
            self.per_asset.set(asset, authority, env)?;
        }
        self.status_issuer.set(&status_issuer, env)
    }

    pub fn asset_authority(
        &self,
        asset: AccountId,
        env: &dyn Environment,
    ) -> SdkResult<Option<AccountId>> {
        self.per_asset.may_get(&asset, env)
    }

    pub fn status_issuer(&self, env: &dyn Environment) -> SdkResult<Option<AccountId>> {
        Ok(self.status_issuer.may_get(env)?.flatten())
    }

    /// The authority expected to have signed a claim carrying `value`.
    pub fn expected_for(
        &self,
        value: &ClaimValue,
        default_asset: AccountId,
        env: &dyn Environment,
    ) -> SdkResult<Option<AccountId>> {
        match value {
            ClaimValue::Status => self.status_issuer(env),
            ClaimValue::Amount(_) => self.asset_authority(default_asset, env),
            ClaimValue::AssetAmount { asset, .. } => self.asset_authority(*asset, env),
        }
    }
}
