//! Off-system signer double.
//!
//! Digests are built here by hand, byte for byte, rather than through the
//! crates under test, so a wrong encoding on either side shows up as a
//! failed recovery.

use alloy_primitives::{keccak256, Address, B256, U256};
use k256::ecdsa::{signature::hazmat::PrehashSigner, RecoveryId, Signature, SigningKey};
use rand::rngs::OsRng;
use vouch_core::AccountId;

const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const VOUCHER_TYPE: &[u8] = b"Voucher(address redeemer,uint256 voucherId,uint256 amount)";
const ASSET_VOUCHER_TYPE: &[u8] =
    b"AssetVoucher(address redeemer,uint256 voucherId,uint256 amount,address asset)";
const STATUS_VOUCHER_TYPE: &[u8] = b"StatusVoucher(address redeemer,uint256 voucherId)";

/// Domain values as an off-system signer sees them.
#[derive(Clone, Debug)]
pub struct TestDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl TestDomain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: "MyEIP712App".to_string(),
            version: "1".to_string(),
            chain_id,
            verifying_contract,
        }
    }

    pub fn separator(&self) -> B256 {
        let mut buf = Vec::with_capacity(32 * 5);
        buf.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
        buf.extend_from_slice(keccak256(self.name.as_bytes()).as_slice());
        buf.extend_from_slice(keccak256(self.version.as_bytes()).as_slice());
        buf.extend_from_slice(&U256::from(self.chain_id).to_be_bytes::<32>());
        buf.extend_from_slice(&word(self.verifying_contract));
        keccak256(&buf)
    }

    /// `keccak256(0x19 0x01 || separator || struct_hash)`.
    pub fn digest(&self, struct_hash: B256) -> B256 {
        let mut buf = vec![0x19, 0x01];
        buf.extend_from_slice(self.separator().as_slice());
        buf.extend_from_slice(struct_hash.as_slice());
        keccak256(&buf)
    }
}

fn word(address: Address) -> [u8; 32] {
    let mut out = [0u8; 32];
    if let Some(tail) = out.get_mut(12..) {
        tail.copy_from_slice(address.as_slice());
    }
    out
}

fn struct_hash(type_string: &[u8], words: &[[u8; 32]]) -> B256 {
    let mut buf = keccak256(type_string).to_vec();
    for w in words {
        buf.extend_from_slice(w);
    }
    keccak256(&buf)
}

pub fn voucher_struct_hash(redeemer: Address, voucher_id: U256, amount: U256) -> B256 {
    struct_hash(
        VOUCHER_TYPE,
        &[
            word(redeemer),
            voucher_id.to_be_bytes::<32>(),
            amount.to_be_bytes::<32>(),
        ],
    )
}

pub fn asset_voucher_struct_hash(
    redeemer: Address,
    voucher_id: U256,
    amount: U256,
    asset: Address,
) -> B256 {
    struct_hash(
        ASSET_VOUCHER_TYPE,
        &[
            word(redeemer),
            voucher_id.to_be_bytes::<32>(),
            amount.to_be_bytes::<32>(),
            word(asset),
        ],
    )
}

pub fn status_voucher_struct_hash(redeemer: Address, voucher_id: U256) -> B256 {
    struct_hash(
        STATUS_VOUCHER_TYPE,
        &[word(redeemer), voucher_id.to_be_bytes::<32>()],
    )
}

/// A secp256k1 key that signs the way wallets do.
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Deterministic key derived from `seed`.
    // Testing code - a keccak output is a valid scalar for every seed in use.
    #[allow(clippy::expect_used)]
    pub fn from_seed(seed: u64) -> Self {
        let secret = keccak256(seed.to_be_bytes());
        let key = SigningKey::from_slice(secret.as_slice()).expect("seed hash is a valid scalar");
        Self { key }
    }

    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }

    pub fn address(&self) -> Address {
        let public_key = self.key.verifying_key().to_encoded_point(false);
        let hash = keccak256(public_key.as_bytes().get(1..).unwrap_or_default());
        Address::from_slice(hash.as_slice().get(12..).unwrap_or_default())
    }

    pub fn account(&self) -> AccountId {
        AccountId::from(self.address())
    }

    /// `r || s || v` over `digest`, with `v` in the 27/28 encoding.
    // Testing code - signing a 32-byte prehash cannot fail.
    #[allow(clippy::expect_used)]
    pub fn sign_digest(&self, digest: B256) -> Vec<u8> {
        let (sig, recovery_id): (Signature, RecoveryId) = self
            .key
            .sign_prehash(digest.as_slice())
            .expect("prehash signing");
        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(27 + u8::from(recovery_id.is_y_odd()));
        bytes
    }

    /// Same as [`Self::sign_digest`] with `v` in the 0/1 encoding.
    pub fn sign_digest_raw_v(&self, digest: B256) -> Vec<u8> {
        let mut bytes = self.sign_digest(digest);
        if let Some(v) = bytes.last_mut() {
            *v -= 27;
        }
        bytes
    }

    pub fn sign_personal(&self, message: &[u8]) -> Vec<u8> {
        let mut buf = format!("\x19Ethereum Signed Message:\n{}", message.len()).into_bytes();
        buf.extend_from_slice(message);
        self.sign_digest(keccak256(&buf))
    }

    pub fn sign_eth(&self, hash: B256) -> Vec<u8> {
        self.sign_personal(hash.as_slice())
    }

    pub fn sign_voucher(
        &self,
        domain: &TestDomain,
        redeemer: Address,
        voucher_id: U256,
        amount: U256,
    ) -> Vec<u8> {
        self.sign_digest(domain.digest(voucher_struct_hash(redeemer, voucher_id, amount)))
    }

    pub fn sign_asset_voucher(
        &self,
        domain: &TestDomain,
        redeemer: Address,
        voucher_id: U256,
        amount: U256,
        asset: Address,
    ) -> Vec<u8> {
        self.sign_digest(domain.digest(asset_voucher_struct_hash(
            redeemer, voucher_id, amount, asset,
        )))
    }

    pub fn sign_status_voucher(
        &self,
        domain: &TestDomain,
        redeemer: Address,
        voucher_id: U256,
    ) -> Vec<u8> {
        self.sign_digest(domain.digest(status_voucher_struct_hash(redeemer, voucher_id)))
    }
}
