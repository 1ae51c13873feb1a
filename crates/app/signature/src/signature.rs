use crate::error::{ERR_RECOVERY_ID, ERR_SIGNATURE_LENGTH, ERR_SIGNATURE_MALLEABLE};
use alloy_primitives::B256;
use vouch_core::{ensure, SdkResult};

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Half the secp256k1 group order. Any `s` above it is the malleable twin of
/// a low-`s` signature.
pub const SECP256K1N_HALF: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// A parsed 65-byte recoverable ECDSA signature.
///
/// Parsing enforces the length, the low-`s` rule and the recovery byte; it
/// does not check that `r` and `s` are valid scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcdsaSignature {
    pub r: B256,
    pub s: B256,
    pub y_parity: bool,
}

impl EcdsaSignature {
    pub fn from_bytes(bytes: &[u8]) -> SdkResult<Self> {
        ensure!(
            bytes.len() == SIGNATURE_LENGTH,
            ERR_SIGNATURE_LENGTH.with_arg(u16::try_from(bytes.len()).unwrap_or(u16::MAX))
        );
        let (r, rest) = bytes.split_at(32);
        let (s, v) = rest.split_at(32);

        // Big-endian byte arrays of equal length order like the integers.
        ensure!(s <= SECP256K1N_HALF.as_slice(), ERR_SIGNATURE_MALLEABLE);

        let v = v.first().copied().ok_or(ERR_SIGNATURE_LENGTH)?;
        let y_parity = match v {
            0 | 27 => false,
            1 | 28 => true,
            other => return Err(ERR_RECOVERY_ID.with_arg(other as u16)),
        };

        Ok(Self {
            r: B256::from_slice(r),
            s: B256::from_slice(s),
            y_parity,
        })
    }

    /// Serializes back to `r || s || v` with `v` in the 27/28 encoding.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        let (r, rest) = out.split_at_mut(32);
        let (s, v) = rest.split_at_mut(32);
        r.copy_from_slice(self.r.as_slice());
        s.copy_from_slice(self.s.as_slice());
        if let Some(v) = v.first_mut() {
            *v = 27 + u8::from(self.y_parity);
        }
        out
    }

    /// The 64-byte `r || s` form expected by secp256k1.
    pub fn compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        let (r, s) = compact.split_at_mut(32);
        r.copy_from_slice(self.r.as_slice());
        s.copy_from_slice(self.s.as_slice());
        compact
    }
}
