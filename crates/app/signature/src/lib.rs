//! Digest construction and secp256k1 signer recovery.
//!
//! Everything here is pure: no storage, no events. Account code in
//! `vouch_voucher` and `vouch_verifier` builds on these primitives.

pub mod digest;
pub mod domain;
pub mod error;
pub mod payload;
pub mod recovery;
pub mod signature;

pub use digest::{eth_sign_digest, personal_digest, raw_digest, typed_data_digest};
pub use domain::DomainContext;
pub use payload::{Payload, Scheme};
pub use recovery::recover_signer;
pub use signature::EcdsaSignature;
