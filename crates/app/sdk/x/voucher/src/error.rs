use core::fmt;
use vouch_core::{define_error, ErrorCode};

// Authorization errors (0x80-0xBF range - business logic errors)
define_error!(
    ERR_INVALID_SIGNATURE,
    0x80,
    "claim signature does not recover to an accepted authority"
);
define_error!(
    ERR_WRONG_REDEEMER,
    0x81,
    "caller is not the claim recipient"
);
define_error!(ERR_ALREADY_REDEEMED, 0x82, "claim already redeemed");
define_error!(
    ERR_LEDGER_FAILURE,
    0x83,
    "value ledger rejected settlement (ledger error {arg})"
);

// Setup errors
define_error!(ERR_ALREADY_INITIALIZED, 0x90, "voucher authorities already initialized");

/// Why a redemption was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedeemFailure {
    InvalidSignature,
    WrongRedeemer,
    AlreadyRedeemed,
    LedgerFailure,
}

impl RedeemFailure {
    /// Maps an error returned by `redeem` onto the failure taxonomy.
    ///
    /// Returns `None` for errors outside it, e.g. host limits.
    pub fn classify(err: ErrorCode) -> Option<Self> {
        if err.is(ERR_INVALID_SIGNATURE) {
            Some(Self::InvalidSignature)
        } else if err.is(ERR_WRONG_REDEEMER) {
            Some(Self::WrongRedeemer)
        } else if err.is(ERR_ALREADY_REDEEMED) {
            Some(Self::AlreadyRedeemed)
        } else if err.is(ERR_LEDGER_FAILURE) {
            Some(Self::LedgerFailure)
        } else {
            None
        }
    }

    /// Whether resubmitting the same claim can succeed later.
    ///
    /// Only a ledger failure can clear: the authority may fund or approve.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::LedgerFailure)
    }
}

impl fmt::Display for RedeemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidSignature => "invalid signature",
            Self::WrongRedeemer => "wrong redeemer",
            Self::AlreadyRedeemed => "already redeemed",
            Self::LedgerFailure => "ledger failure",
        })
    }
}
