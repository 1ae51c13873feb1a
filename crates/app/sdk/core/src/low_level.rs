//! Typed wrappers over the closure-based [`Environment`] calls.

use crate::{AccountId, Environment, SdkResult, ERR_CALL_CONSUMED};

/// Runs `call` as account `to` and returns its result.
///
/// All of `call`'s effects are reverted when it returns an error.
pub fn exec_account<R>(
    to: AccountId,
    env: &mut dyn Environment,
    call: impl FnOnce(&mut dyn Environment) -> SdkResult<R>,
) -> SdkResult<R> {
    let mut call = Some(call);
    let mut output = None;
    env.do_exec(to, &mut |env| {
        let call = call.take().ok_or(ERR_CALL_CONSUMED)?;
        output = Some(call(env)?);
        Ok(())
    })?;
    output.ok_or(ERR_CALL_CONSUMED)
}

/// Runs `call` in the current context and returns its result.
///
/// Either every write and event of `call` lands, or none does.
pub fn atomically<R>(
    env: &mut dyn Environment,
    call: impl FnOnce(&mut dyn Environment) -> SdkResult<R>,
) -> SdkResult<R> {
    let mut call = Some(call);
    let mut output = None;
    env.atomically(&mut |env| {
        let call = call.take().ok_or(ERR_CALL_CONSUMED)?;
        output = Some(call(env)?);
        Ok(())
    })?;
    output.ok_or(ERR_CALL_CONSUMED)
}
