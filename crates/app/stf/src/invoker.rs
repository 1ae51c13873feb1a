use crate::errors::ERR_EXEC_IN_QUERY;
use crate::execution_state::ExecutionState;
use crate::storage::account_key;
use crate::validation::validate_event;
use vouch_core::events_api::Event;
use vouch_core::{
    AccountId, Environment, ExecFn, ReadonlyKV, SdkResult, ERR_CALL_DEPTH_EXCEEDED,
};

/// Maximum depth of nested inter-account calls.
pub const MAX_CALL_DEPTH: u16 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionScope {
    Exec,
    Query,
}

/// The [`Environment`] handed to account code while a call executes.
///
/// Every storage key is prefixed with the running account's id, so accounts
/// only reach each other's state through [`Environment::do_exec`].
pub struct Invoker<'s, 'a, S> {
    pub(crate) whoami: AccountId,
    pub(crate) sender: AccountId,
    pub(crate) storage: &'a mut ExecutionState<'s, S>,
    pub(crate) scope: ExecutionScope,
    pub(crate) call_depth: u16,
}

impl<'s, 'a, S: ReadonlyKV> Invoker<'s, 'a, S> {
    pub fn new_for_exec(
        storage: &'a mut ExecutionState<'s, S>,
        whoami: AccountId,
        sender: AccountId,
    ) -> Self {
        Self {
            whoami,
            sender,
            storage,
            scope: ExecutionScope::Exec,
            call_depth: 0,
        }
    }

    pub fn new_for_query(storage: &'a mut ExecutionState<'s, S>, whoami: AccountId) -> Self {
        Self {
            whoami,
            sender: AccountId::default(),
            storage,
            scope: ExecutionScope::Query,
            call_depth: 0,
        }
    }

    pub fn branch_exec<'b>(&'b mut self, to: AccountId) -> Invoker<'s, 'b, S> {
        Invoker {
            whoami: to,
            sender: self.whoami,
            storage: self.storage,
            scope: self.scope,
            call_depth: self.call_depth.saturating_add(1),
        }
    }

    fn ensure_exec(&self) -> SdkResult<()> {
        match self.scope {
            ExecutionScope::Exec => Ok(()),
            ExecutionScope::Query => Err(ERR_EXEC_IN_QUERY),
        }
    }
}

impl<S: ReadonlyKV> Environment for Invoker<'_, '_, S> {
    fn whoami(&self) -> AccountId {
        self.whoami
    }

    fn sender(&self) -> AccountId {
        self.sender
    }

    fn is_query(&self) -> bool {
        matches!(self.scope, ExecutionScope::Query)
    }

    fn storage_get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        self.storage.get(&account_key(self.whoami, key))
    }

    fn storage_set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        self.ensure_exec()?;
        self.storage.set(&account_key(self.whoami, key), value)
    }

    fn storage_remove(&mut self, key: &[u8]) -> SdkResult<()> {
        self.ensure_exec()?;
        self.storage.remove(&account_key(self.whoami, key))
    }

    fn emit_event(&mut self, name: &str, data: &[u8]) -> SdkResult<()> {
        self.ensure_exec()?;
        validate_event(name, data)?;
        self.storage.emit_event(Event {
            source: self.whoami,
            name: name.to_string(),
            contents: data.to_vec(),
        })
    }

    fn do_exec(&mut self, to: AccountId, call: &mut ExecFn<'_>) -> SdkResult<()> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(ERR_CALL_DEPTH_EXCEEDED);
        }

        // Take checkpoint before ANY state changes
        let checkpoint = self.storage.checkpoint();
        let result = call(&mut self.branch_exec(to));
        if let Err(err) = result {
            self.storage.restore(checkpoint)?;
            return Err(err);
        }
        Ok(())
    }

    fn atomically(&mut self, call: &mut ExecFn<'_>) -> SdkResult<()> {
        let checkpoint = self.storage.checkpoint();
        if let Err(err) = call(self) {
            self.storage.restore(checkpoint)?;
            return Err(err);
        }
        Ok(())
    }
}
