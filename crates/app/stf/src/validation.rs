use vouch_core::SdkResult;

use crate::errors::{ERR_EVENT_CONTENT_TOO_LARGE, ERR_EVENT_NAME_TOO_LONG};

pub(crate) const MAX_EVENT_NAME_LENGTH: usize = 128;
pub(crate) const MAX_EVENT_CONTENT_SIZE: usize = 64 * 1024;

/// Validates event data before emission.
pub fn validate_event(name: &str, contents: &[u8]) -> SdkResult<()> {
    if name.is_empty() || name.len() > MAX_EVENT_NAME_LENGTH {
        return Err(ERR_EVENT_NAME_TOO_LONG);
    }
    if contents.len() > MAX_EVENT_CONTENT_SIZE {
        return Err(ERR_EVENT_CONTENT_TOO_LARGE);
    }
    Ok(())
}
