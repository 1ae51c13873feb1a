use vouch_core::events_api::Event;
use vouch_core::SdkResult;

/// Outcome of one [`crate::Stf::execute`] call.
///
/// `events` is empty whenever `response` is an error: nothing of a failed
/// call is kept.
#[derive(Debug)]
pub struct ExecResult<R> {
    pub response: SdkResult<R>,
    pub events: Vec<Event>,
}

impl<R> ExecResult<R> {
    pub fn is_ok(&self) -> bool {
        self.response.is_ok()
    }
}
