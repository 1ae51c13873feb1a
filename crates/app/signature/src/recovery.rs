use alloy_primitives::{keccak256, Address, B256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use std::sync::OnceLock;
use vouch_core::SdkResult;

use crate::error::ERR_SIGNATURE_RECOVERY;
use crate::signature::EcdsaSignature;

/// Recovers the address that produced `signature` over `digest`.
///
/// `signature` is `r || s || v` with `v` in `{0, 1, 27, 28}`. A well-formed
/// signature over some other digest yields a different address rather than
/// an error; comparing against the expected signer is up to the caller.
pub fn recover_signer(digest: B256, signature: &[u8]) -> SdkResult<Address> {
    let signature = EcdsaSignature::from_bytes(signature)?;
    recover_parsed(digest, &signature)
}

pub fn recover_parsed(digest: B256, signature: &EcdsaSignature) -> SdkResult<Address> {
    let recid = RecoveryId::from_i32(i32::from(signature.y_parity))
        .map_err(|_| ERR_SIGNATURE_RECOVERY)?;
    let recoverable = RecoverableSignature::from_compact(&signature.compact(), recid)
        .map_err(|_| ERR_SIGNATURE_RECOVERY)?;

    let msg = Message::from_digest_slice(digest.as_slice()).map_err(|_| ERR_SIGNATURE_RECOVERY)?;
    let pubkey = secp()
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|_| ERR_SIGNATURE_RECOVERY)?;
    let uncompressed = pubkey.serialize_uncompressed();
    let pubkey_payload = uncompressed.get(1..).ok_or(ERR_SIGNATURE_RECOVERY)?;
    let hash = keccak256(pubkey_payload);
    let address_bytes = hash.as_slice().get(12..).ok_or(ERR_SIGNATURE_RECOVERY)?;
    Ok(Address::from_slice(address_bytes))
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ERR_RECOVERY_ID, ERR_SIGNATURE_LENGTH, ERR_SIGNATURE_MALLEABLE};
    use alloy_primitives::U256;
    use k256::ecdsa::{signature::hazmat::PrehashSigner, RecoveryId as KRecoveryId, Signature};
    use k256::ecdsa::{SigningKey, VerifyingKey};
    use rand::rngs::OsRng;

    const SECP256K1N: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

    fn sign_hash(signing_key: &SigningKey, hash: B256, v_offset: u8) -> Vec<u8> {
        let (sig, recovery_id): (Signature, KRecoveryId) =
            signing_key.sign_prehash(hash.as_ref()).unwrap();
        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(u8::from(recovery_id.is_y_odd()) + v_offset);
        bytes
    }

    fn get_address(signing_key: &SigningKey) -> Address {
        let verifying_key = VerifyingKey::from(signing_key);
        let public_key = verifying_key.to_encoded_point(false);
        let public_key_bytes = &public_key.as_bytes()[1..];
        let hash = keccak256(public_key_bytes);
        Address::from_slice(&hash[12..])
    }

    #[test]
    fn test_recover_in_both_v_encodings() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"voucher-recovery-test");

        for v_offset in [0, 27] {
            let signature = sign_hash(&signing_key, digest, v_offset);
            let recovered = recover_signer(digest, &signature).unwrap();
            assert_eq!(recovered, get_address(&signing_key));
        }
    }

    #[test]
    fn test_other_digest_recovers_other_address() {
        let signing_key = SigningKey::random(&mut OsRng);
        let signed = keccak256(b"signed");
        let signature = sign_hash(&signing_key, signed, 27);

        let recovered = recover_signer(keccak256(b"presented"), &signature);

        // Either a different address or a recovery failure; never the signer.
        if let Ok(address) = recovered {
            assert_ne!(address, get_address(&signing_key));
        }
    }

    #[test]
    fn test_high_s_twin_rejected() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"malleability");
        let mut signature = sign_hash(&signing_key, digest, 27);

        let n = U256::from_str_radix(SECP256K1N, 16).unwrap();
        let s = U256::from_be_slice(&signature[32..64]);
        let twin = n - s;
        signature[32..64].copy_from_slice(&twin.to_be_bytes::<32>());
        signature[64] = if signature[64] == 27 { 28 } else { 27 };

        assert_eq!(
            recover_signer(digest, &signature),
            Err(ERR_SIGNATURE_MALLEABLE)
        );
    }

    #[test]
    fn test_malformed_inputs() {
        let digest = keccak256(b"malformed");

        let err = recover_signer(digest, &[1u8; 10]).unwrap_err();
        assert!(err.is(ERR_SIGNATURE_LENGTH));

        let mut bad_v = vec![1u8; 64];
        bad_v.push(5);
        assert!(recover_signer(digest, &bad_v).unwrap_err().is(ERR_RECOVERY_ID));

        let mut zero_r = vec![0u8; 64];
        zero_r[63] = 1;
        zero_r.push(27);
        assert_eq!(recover_signer(digest, &zero_r), Err(ERR_SIGNATURE_RECOVERY));
    }

    #[test]
    fn test_forged_recovery_id_changes_signer() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"forged-recovery-id");
        let valid = sign_hash(&signing_key, digest, 27);
        let mut forged = valid.clone();
        forged[64] = if valid[64] == 27 { 28 } else { 27 };

        let recovered_valid = recover_signer(digest, &valid).unwrap();
        let recovered_forged = recover_signer(digest, &forged);

        assert_eq!(recovered_valid, get_address(&signing_key));
        if let Ok(address) = recovered_forged {
            assert_ne!(address, recovered_valid);
        }
    }
}
