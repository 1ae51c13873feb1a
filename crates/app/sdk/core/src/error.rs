//! Compact error codes with per-crate namespaces.
//!
//! ## Error ID Conventions
//!
//! Each error has a 16-bit ID composed of:
//! - Upper 8 bits: Crate namespace (hashed from the declaring crate's package name)
//! - Lower 8 bits: Local error ID (0x00-0xFF)
//!
//! ### Recommended Local ID Ranges:
//! - 0x00-0x3F: Validation errors (malformed input, bad signature encoding)
//! - 0x40-0x7F: System errors (storage failures, call nesting)
//! - 0x80-0xBF: Business logic errors (unauthorized, insufficient funds, replay)
//! - 0xC0-0xFF: Reserved for future use
//!
//! The `arg` half carries a small payload, e.g. the id of a wrapped error.

use core::fmt;

#[cfg(feature = "error-decode")]
use linkme::distributed_slice;

/* ───────────────────────────── Runtime handle ──────────────────────────── */

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    pub id: u16,
    pub arg: u16,
}

impl ErrorCode {
    pub const fn new(id: u16) -> Self {
        Self { id, arg: 0 }
    }

    pub const fn new_with_arg(id: u16, arg: u16) -> Self {
        Self { id, arg }
    }

    /// Returns this code carrying `arg`, keeping the id.
    pub const fn with_arg(self, arg: u16) -> Self {
        Self { id: self.id, arg }
    }

    pub const fn code(self) -> u64 {
        self.id as u64
    }

    pub const fn arg(self) -> u16 {
        self.arg
    }

    /// Upper byte of the id.
    pub const fn namespace(self) -> u8 {
        (self.id >> 8) as u8
    }

    /// Same error kind, ignoring `arg`.
    pub const fn is(self, other: ErrorCode) -> bool {
        self.id == other.id
    }
}

/* ───────────────────────── Templates (host only) ───────────────────────── */

#[cfg(feature = "error-decode")]
#[derive(Debug)]
pub struct ErrorTemplate {
    pub id: u16,
    pub text: &'static str,
}

#[cfg(feature = "error-decode")]
#[distributed_slice]
pub static ERROR_TEMPLATES: [ErrorTemplate] = [..];

#[cfg(feature = "error-decode")]
fn decode_error(handle: ErrorCode) -> String {
    let tmpl = ERROR_TEMPLATES
        .iter()
        .find(|t| t.id == handle.id)
        .map(|t| t.text)
        .unwrap_or("<unknown error>");

    match tmpl.find("{arg}") {
        Some(pos) => {
            let mut out = String::with_capacity(tmpl.len() + 5);
            out.push_str(&tmpl[..pos]);
            out.push_str(&format!("{:#06x}", handle.arg));
            out.push_str(&tmpl[pos + 5..]);
            out
        }
        None => tmpl.into(),
    }
}

/* ───────────────────── Display / Debug implementations ─────────────────── */

#[cfg(feature = "error-decode")]
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decode_error(*self))
    }
}

#[cfg(not(feature = "error-decode"))]
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {:#06x} (arg {:#06x})", self.id, self.arg)
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCode {{ id: {:#06x}, arg: {} }}", self.id, self.arg)
    }
}

impl std::error::Error for ErrorCode {}

/* ───────────────────── define_error! helper macro ──────────────────────── */

/// Declares a public [`ErrorCode`] constant namespaced to the calling crate.
///
/// `env!("CARGO_PKG_NAME")` expands in the invoking crate, so two crates using
/// the same local id still produce different codes.
#[macro_export]
macro_rules! define_error {
    ($ident:ident, $local:expr, $text:expr) => {
        #[allow(dead_code)]
        pub const $ident: $crate::error::ErrorCode = {
            const LOCAL_ID: u16 = $local;
            const _: () = assert!(
                LOCAL_ID <= 0xFF,
                "Local error ID must be <= 0xFF to fit in u8"
            );
            $crate::error::ErrorCode::new(
                (($crate::error::namespace_of(env!("CARGO_PKG_NAME")) as u16) << 8)
                    | (LOCAL_ID & 0xFF),
            )
        };

        #[cfg(feature = "error-decode")]
        const _: () = {
            use $crate::error::{ErrorTemplate, ERROR_TEMPLATES};

            #[$crate::error::linkme::distributed_slice(ERROR_TEMPLATES)]
            #[linkme(crate = $crate::error::linkme)]
            static ENTRY: ErrorTemplate = ErrorTemplate {
                id: $ident.id,
                text: $text,
            };
        };
    };
}

#[cfg(feature = "error-decode")]
#[doc(hidden)]
pub use linkme;

/* ────────────────── Per-crate namespace (compile-time FNV-1a) ──────────── */

/// FNV-1a over the package name, folded to one byte.
pub const fn namespace_of(package: &str) -> u8 {
    const FNV_PRIME: u64 = 0x100000001b3;
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;

    let bytes = package.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    (hash & 0xFF) as u8
}

/* ───────────────────────────── Unit tests ──────────────────────────────── */
