//! Minimal multi-asset ledger: balances, allowances and status records.
//!
//! Every asset is identified by an [`AccountId`]. The ledger implements
//! [`ValueLedger`] through [`TokenRef`], which calls into the ledger account
//! so that the caller's account becomes the spender.

use borsh::{BorshDeserialize, BorshSerialize};
use vouch_collections::{item::Item, map::Map};
use vouch_core::low_level::exec_account;
use vouch_core::{
    define_error, ensure, AccountId, Environment, SdkResult, ERR_OVERFLOW, ERR_UNAUTHORIZED,
};
use vouch_value_ledger::{ClaimKey, ValueLedger};

define_error!(ERR_NOT_ENOUGH_BALANCE, 0x80, "not enough balance");
define_error!(ERR_INSUFFICIENT_ALLOWANCE, 0x81, "insufficient allowance");
define_error!(
    ERR_STATUS_ALREADY_RECORDED,
    0x82,
    "status already recorded for claim"
);

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitialBalance {
    pub asset: AccountId,
    pub holder: AccountId,
    pub amount: u128,
}

pub struct Token {
    pub supply_manager: Item<Option<AccountId>>,
    pub status_issuer: Item<Option<AccountId>>,
    pub balances: Map<(AccountId, AccountId), u128>,
    pub allowances: Map<(AccountId, AccountId, AccountId), u128>,
    pub total_supply: Map<AccountId, u128>,
    pub statuses: Map<ClaimKey, AccountId>,
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

impl Token {
    pub const fn new() -> Self {
        Self {
            supply_manager: Item::new(0),
            status_issuer: Item::new(1),
            balances: Map::new(2),
            allowances: Map::new(3),
            total_supply: Map::new(4),
            statuses: Map::new(5),
        }
    }

    pub fn initialize(
        &self,
        balances: Vec<InitialBalance>,
        supply_manager: Option<AccountId>,
        status_issuer: Option<AccountId>,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        for InitialBalance {
            asset,
            holder,
            amount,
        } in balances
        {
            self.mint_unchecked(asset, holder, amount, env)?;
        }
        self.supply_manager.set(&supply_manager, env)?;
        self.status_issuer.set(&status_issuer, env)?;
        Ok(())
    }

    pub fn mint_unchecked(
        &self,
        asset: AccountId,
        recipient: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        self.total_supply.update(
            &asset,
            |supply| supply.unwrap_or_default().checked_add(amount).ok_or(ERR_OVERFLOW),
            env,
        )?;
        self.credit(asset, recipient, amount, env)
    }

    pub fn mint(
        &self,
        asset: AccountId,
        recipient: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        ensure!(
            self.supply_manager.may_get(env)?.flatten() == Some(env.sender()),
            ERR_UNAUTHORIZED
        );
        self.mint_unchecked(asset, recipient, amount, env)
    }

    /// Moves `amount` of the sender's `asset` to `to`.
    pub fn transfer(
        &self,
        asset: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        let from = env.sender();
        self.move_balance(asset, from, to, amount, env)
    }

    /// Lets `spender` move up to `amount` of the sender's `asset`.
    ///
    /// Overwrites any previous allowance.
    pub fn approve(
        &self,
        asset: AccountId,
        spender: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        let owner = env.sender();
        self.allowances.set(&(asset, owner, spender), &amount, env)
    }

    /// Moves `amount` of `owner`'s `asset` to `to`, spending the allowance
    /// `owner` granted to the sender.
    pub fn transfer_from(
        &self,
        asset: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        let spender = env.sender();
        self.allowances.update(
            &(asset, owner, spender),
            |allowance| {
                allowance
                    .unwrap_or_default()
                    .checked_sub(amount)
                    .ok_or(ERR_INSUFFICIENT_ALLOWANCE)
            },
            env,
        )?;
        self.move_balance(asset, owner, to, amount, env)
    }

    pub fn record_status(
        &self,
        claim_id: ClaimKey,
        recipient: AccountId,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        ensure!(
            self.status_issuer.may_get(env)?.flatten() == Some(env.sender()),
            ERR_UNAUTHORIZED
        );
        ensure!(
            !self.statuses.contains(&claim_id, env)?,
            ERR_STATUS_ALREADY_RECORDED
        );
        self.statuses.set(&claim_id, &recipient, env)
    }

    pub fn balance(
        &self,
        asset: AccountId,
        holder: AccountId,
        env: &dyn Environment,
    ) -> SdkResult<u128> {
        Ok(self
            .balances
            .may_get(&(asset, holder), env)?
            .unwrap_or_default())
    }

    pub fn allowance(
        &self,
        asset: AccountId,
        owner: AccountId,
        spender: AccountId,
        env: &dyn Environment,
    ) -> SdkResult<u128> {
        Ok(self
            .allowances
            .may_get(&(asset, owner, spender), env)?
            .unwrap_or_default())
    }

    pub fn supply(&self, asset: AccountId, env: &dyn Environment) -> SdkResult<u128> {
        Ok(self.total_supply.may_get(&asset, env)?.unwrap_or_default())
    }

    pub fn status_holder(
        &self,
        claim_id: ClaimKey,
        env: &dyn Environment,
    ) -> SdkResult<Option<AccountId>> {
        self.statuses.may_get(&claim_id, env)
    }

    fn move_balance(
        &self,
        asset: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        self.balances.update(
            &(asset, from),
            |balance| {
                balance
                    .unwrap_or_default()
                    .checked_sub(amount)
                    .ok_or(ERR_NOT_ENOUGH_BALANCE)
            },
            env,
        )?;
        self.credit(asset, to, amount, env)
    }

    fn credit(
        &self,
        asset: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        self.balances.update(
            &(asset, to),
            |balance| balance.unwrap_or_default().checked_add(amount).ok_or(ERR_OVERFLOW),
            env,
        )?;
        Ok(())
    }
}

/// Handle to a [`Token`] ledger living at `account`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenRef {
    pub account: AccountId,
}

impl TokenRef {
    pub const fn new(account: AccountId) -> Self {
        Self { account }
    }

    pub fn approve(
        &self,
        asset: AccountId,
        spender: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        exec_account(self.account, env, |env| {
            Token::new().approve(asset, spender, amount, env)
        })
    }

    pub fn transfer(
        &self,
        asset: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        exec_account(self.account, env, |env| {
            Token::new().transfer(asset, to, amount, env)
        })
    }
}

impl ValueLedger for TokenRef {
    fn transfer_on_behalf(
        &self,
        asset: AccountId,
        from_pool: AccountId,
        to: AccountId,
        amount: u128,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        exec_account(self.account, env, |env| {
            Token::new().transfer_from(asset, from_pool, to, amount, env)
        })
    }

    fn record_status(
        &self,
        claim_id: ClaimKey,
        recipient: AccountId,
        env: &mut dyn Environment,
    ) -> SdkResult<()> {
        exec_account(self.account, env, |env| {
            Token::new().record_status(claim_id, recipient, env)
        })
    }
}
