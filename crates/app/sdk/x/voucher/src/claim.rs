use alloy_primitives::{B256, U256};
use alloy_sol_types::SolStruct;
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use vouch_core::AccountId;
use vouch_signature::{typed_data_digest, DomainContext};

mod typed {
    use alloy_sol_types::sol;

    sol! {
        struct Voucher {
            address redeemer;
            uint256 voucherId;
            uint256 amount;
        }

        struct AssetVoucher {
            address redeemer;
            uint256 voucherId;
            uint256 amount;
            address asset;
        }

        struct StatusVoucher {
            address redeemer;
            uint256 voucherId;
        }
    }
}

/// A 256-bit claim identifier, held as big-endian bytes.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct ClaimId([u8; 32]);

impl ClaimId {
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn to_u256(self) -> U256 {
        U256::from_be_bytes(self.0)
    }
}

impl From<U256> for ClaimId {
    fn from(value: U256) -> Self {
        Self(value.to_be_bytes::<32>())
    }
}

impl From<u64> for ClaimId {
    fn from(value: u64) -> Self {
        Self::from(U256::from(value))
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_u256(), f)
    }
}

impl fmt::Debug for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimId({})", self.to_u256())
    }
}

/// What a claim entitles its recipient to.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ClaimValue {
    /// A non-value grant, settled as a status record.
    Status,
    /// An amount of the voucher's default asset.
    Amount(u128),
    /// An amount of an explicitly named asset.
    AssetAmount { asset: AccountId, amount: u128 },
}

impl ClaimValue {
    pub const fn amount(&self) -> Option<u128> {
        match self {
            ClaimValue::Status => None,
            ClaimValue::Amount(amount) | ClaimValue::AssetAmount { amount, .. } => Some(*amount),
        }
    }
}

/// An off-system signed, single-use entitlement.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Claim {
    pub claim_id: ClaimId,
    pub recipient: AccountId,
    pub value: ClaimValue,
    /// `r || s || v`, 65 bytes when well formed.
    pub signature: Vec<u8>,
}

impl Claim {
    /// `hashStruct` of the typed message the authority signs. The struct
    /// type follows the value's shape.
    pub fn struct_hash(&self) -> B256 {
        let redeemer = self.recipient.to_address();
        let voucher_id = self.claim_id.to_u256();
        match &self.value {
            ClaimValue::Status => typed::StatusVoucher {
                redeemer,
                voucherId: voucher_id,
            }
            .eip712_hash_struct(),
            ClaimValue::Amount(amount) => typed::Voucher {
                redeemer,
                voucherId: voucher_id,
                amount: U256::from(*amount),
            }
            .eip712_hash_struct(),
            ClaimValue::AssetAmount { asset, amount } => typed::AssetVoucher {
                redeemer,
                voucherId: voucher_id,
                amount: U256::from(*amount),
                asset: asset.to_address(),
            }
            .eip712_hash_struct(),
        }
    }

    /// The digest the authority must have signed under `domain`.
    pub fn digest(&self, domain: &DomainContext) -> B256 {
        typed_data_digest(domain.separator(), self.struct_hash())
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use vouch_testing::signer::{
        asset_voucher_struct_hash, status_voucher_struct_hash, voucher_struct_hash,
    };
    use vouch_testing::TestDomain;

    const RECIPIENT: AccountId = AccountId::from_u128(0xBEEF);
    const ASSET: AccountId = AccountId::from_u128(0xA55E7);

    fn claim(id: u64, value: ClaimValue) -> Claim {
        Claim {
            claim_id: ClaimId::from(id),
            recipient: RECIPIENT,
            value,
            signature: vec![],
        }
    }

    #[test]
    fn test_claim_id_round_trips_through_u256() {
        let value = U256::from(123_456_789u64) << 200;
        let id = ClaimId::from(value);
        assert_eq!(id.to_u256(), value);
        assert_eq!(ClaimId::from(1u64).to_string(), "1");
        assert_eq!(ClaimId::from(1u64).to_be_bytes()[31], 1);
    }

    #[test]
    fn test_struct_hashes_match_wallet_encoding() {
        let redeemer = RECIPIENT.to_address();
        let id = U256::from(9);

        assert_eq!(
            claim(9, ClaimValue::Amount(100)).struct_hash(),
            voucher_struct_hash(redeemer, id, U256::from(100))
        );
        assert_eq!(
            claim(9, ClaimValue::AssetAmount { asset: ASSET, amount: 5 }).struct_hash(),
            asset_voucher_struct_hash(redeemer, id, U256::from(5), ASSET.to_address())
        );
        assert_eq!(
            claim(9, ClaimValue::Status).struct_hash(),
            status_voucher_struct_hash(redeemer, id)
        );
    }

    #[test]
    fn test_digest_matches_wallet_digest() {
        let contract = Address::repeat_byte(0x77);
        let domain = DomainContext::with_defaults(31337, contract);
        let wallet = TestDomain::new(31337, contract);
        let c = claim(1, ClaimValue::Amount(100));

        assert_eq!(c.digest(&domain), wallet.digest(c.struct_hash()));
    }

    #[test]
    fn test_zero_amount_differs_from_status() {
        assert_ne!(
            claim(1, ClaimValue::Amount(0)).struct_hash(),
            claim(1, ClaimValue::Status).struct_hash()
        );
    }

    #[test]
    fn test_signature_not_part_of_digest() {
        let domain = DomainContext::with_defaults(1, Address::ZERO);
        let mut a = claim(1, ClaimValue::Amount(1));
        let b = a.clone();
        a.signature = vec![1; 65];

        assert_eq!(a.digest(&domain), b.digest(&domain));
    }

    #[test]
    fn test_value_amount() {
        assert_eq!(ClaimValue::Status.amount(), None);
        assert_eq!(ClaimValue::Amount(3).amount(), Some(3));
        assert_eq!(
            ClaimValue::AssetAmount { asset: ASSET, amount: 4 }.amount(),
            Some(4)
        );
    }
}
