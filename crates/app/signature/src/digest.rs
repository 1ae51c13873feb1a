//! The digests a signer can have signed.

use alloy_primitives::{eip191_hash_message, keccak256, B256};

/// EIP-712 envelope prefix.
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// The 32 bytes are the digest; nothing is prepended.
pub const fn raw_digest(hash: B256) -> B256 {
    hash
}

/// `eth_sign` over a 32-byte hash: the personal-message prefix with length 32.
pub fn eth_sign_digest(hash: B256) -> B256 {
    eip191_hash_message(hash.as_slice())
}

/// EIP-191 version 0x45 over an arbitrary message.
pub fn personal_digest(message: &[u8]) -> B256 {
    eip191_hash_message(message)
}

/// `keccak256(0x19 0x01 || domain_separator || struct_hash)`.
pub fn typed_data_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut buf = [0u8; 66];
    let (prefix, rest) = buf.split_at_mut(2);
    let (separator, hash) = rest.split_at_mut(32);
    prefix.copy_from_slice(&TYPED_DATA_PREFIX);
    separator.copy_from_slice(domain_separator.as_slice());
    hash.copy_from_slice(struct_hash.as_slice());
    keccak256(buf)
}
