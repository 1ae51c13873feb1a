//! Typed storage collections layered over an account's key-value namespace.
//!
//! Every collection owns a one-byte prefix; keys are `prefix || borsh(key)`.
//! Prefixes must be unique within an account.

use vouch_core::define_error;

pub mod item;
pub mod map;

#[cfg(test)]
mod mocks;

define_error!(ERR_NOT_FOUND, 0x01, "object not found");
