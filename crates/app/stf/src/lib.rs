//! # State transition host
//!
//! A single sequential state machine over an in-memory store. Each call to
//! [`Stf::execute`] runs against an overlay of the committed state; a call
//! that returns `Ok` commits all of its writes and events, one that returns
//! `Err` commits nothing.
//!
//! Calls are totally ordered: `execute` takes `&mut self`, so a call always
//! observes every effect of the calls committed before it.

mod errors;
pub mod execution_state;
mod invoker;
pub mod results;
pub mod storage;
mod validation;

pub use errors::*;
pub use invoker::MAX_CALL_DEPTH;
pub use results::ExecResult;
pub use storage::{MemoryStorage, StateChange};

use crate::execution_state::ExecutionState;
use crate::invoker::Invoker;
use vouch_core::{AccountId, Environment, SdkResult};

#[derive(Debug, Default)]
pub struct Stf {
    storage: MemoryStorage,
}

impl Stf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    /// Runs `call` as account `to`, authenticated as `sender`.
    pub fn execute<R>(
        &mut self,
        sender: AccountId,
        to: AccountId,
        call: impl FnOnce(&mut dyn Environment) -> SdkResult<R>,
    ) -> ExecResult<R> {
        let mut state = ExecutionState::new(&self.storage);
        let response = call(&mut Invoker::new_for_exec(&mut state, to, sender));

        match response {
            Ok(value) => {
                let (changes, events) = state.into_results();
                tracing::debug!(
                    %sender,
                    %to,
                    changes = changes.len(),
                    events = events.len(),
                    "call committed"
                );
                self.storage.apply_changes(changes);
                ExecResult {
                    response: Ok(value),
                    events,
                }
            }
            Err(err) => {
                tracing::debug!(%sender, %to, error = %err, "call reverted");
                ExecResult {
                    response: Err(err),
                    events: vec![],
                }
            }
        }
    }

    /// Runs `call` as account `account` with read-only access.
    pub fn query<R>(
        &self,
        account: AccountId,
        call: impl FnOnce(&mut dyn Environment) -> SdkResult<R>,
    ) -> SdkResult<R> {
        let mut state = ExecutionState::new(&self.storage);
        call(&mut Invoker::new_for_query(&mut state, account))
    }
}
