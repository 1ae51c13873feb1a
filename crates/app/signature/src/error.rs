//! Signature-specific error codes.

use vouch_core::define_error;

// Encoding errors (0x10-0x1F range - validation errors)
define_error!(
    ERR_SIGNATURE_LENGTH,
    0x10,
    "signature must be 65 bytes, got {arg}"
);
define_error!(
    ERR_SIGNATURE_MALLEABLE,
    0x11,
    "signature s value is in the upper half of the curve order"
);
define_error!(ERR_RECOVERY_ID, 0x12, "invalid recovery id {arg}");
define_error!(
    ERR_SIGNATURE_RECOVERY,
    0x13,
    "failed to recover signer from signature"
);
