//! Core types shared by every vouch crate: identities, error codes, and the
//! [`Environment`] through which account code reads and writes state.

use alloy_primitives::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;

pub mod encoding;
#[macro_use]
pub mod error;
pub mod events_api;
pub mod low_level;

pub use error::ErrorCode;

define_error!(ERR_ENCODING, 0x00, "encoding error");
define_error!(ERR_UNAUTHORIZED, 0x01, "unauthorized");
define_error!(ERR_OVERFLOW, 0x02, "arithmetic overflow");
define_error!(ERR_CALL_DEPTH_EXCEEDED, 0x40, "call depth exceeded");
define_error!(ERR_CALL_CONSUMED, 0x41, "call closure invoked more than once");

pub type SdkResult<T> = Result<T, ErrorCode>;

/// A 20-byte account identity, the same width as an Ethereum address.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct AccountId([u8; 20]);

impl AccountId {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Builds an id whose last 16 bytes hold `n`; handy for well-known accounts.
    pub const fn from_u128(n: u128) -> Self {
        let tail = n.to_be_bytes();
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 16 {
            bytes[i + 4] = tail[i];
            i += 1;
        }
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub const fn to_address(self) -> Address {
        Address::new(self.0)
    }
}

impl From<Address> for AccountId {
    fn from(address: Address) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(address.as_slice());
        Self(bytes)
    }
}

impl From<AccountId> for Address {
    fn from(id: AccountId) -> Self {
        id.to_address()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_address(), f)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_address())
    }
}

/// Boxed form of the closures passed to [`Environment::do_exec`] and
/// [`Environment::atomically`].
pub type ExecFn<'a> = dyn FnMut(&mut dyn Environment) -> SdkResult<()> + 'a;

/// The view account code has of the host while it executes.
///
/// Storage keys are scoped to [`Environment::whoami`]: two accounts writing
/// the same key never observe each other's values.
pub trait Environment {
    /// The account whose code is running.
    fn whoami(&self) -> AccountId;

    /// The authenticated caller of the running code.
    fn sender(&self) -> AccountId;

    /// Whether the code runs as a read-only query, where writes and events
    /// are refused.
    fn is_query(&self) -> bool {
        false
    }

    fn storage_get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>>;

    fn storage_set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()>;

    fn storage_remove(&mut self, key: &[u8]) -> SdkResult<()>;

    fn emit_event(&mut self, name: &str, data: &[u8]) -> SdkResult<()>;

    /// Runs `call` as account `to` with the current account as sender.
    ///
    /// Every write and event produced by `call` is reverted if it fails.
    fn do_exec(&mut self, to: AccountId, call: &mut ExecFn<'_>) -> SdkResult<()>;

    /// Runs `call` in the current context as one all-or-nothing unit.
    fn atomically(&mut self, call: &mut ExecFn<'_>) -> SdkResult<()>;
}

/// Read access to a committed key-value store.
pub trait ReadonlyKV {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>>;
}

/// Ensures a condition holds, returning the given error otherwise.
///
/// ```rust
/// use vouch_core::{ensure, SdkResult, ERR_UNAUTHORIZED};
///
/// fn only_positive(value: i32) -> SdkResult<i32> {
///     ensure!(value > 0, ERR_UNAUTHORIZED);
///     Ok(value)
/// }
///
/// assert!(only_positive(1).is_ok());
/// assert_eq!(only_positive(-1), Err(ERR_UNAUTHORIZED));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
