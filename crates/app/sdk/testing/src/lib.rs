//! Testing utilities for vouch account code.

// Testing code - determinism requirements do not apply.
#![allow(clippy::disallowed_types)]

pub mod signer;

pub use signer::{TestDomain, TestSigner};

use vouch_core::events_api::Event;
use vouch_core::{AccountId, Environment, ExecFn, SdkResult};
use std::collections::HashMap;

/// In-memory [`Environment`] spanning any number of accounts.
///
/// Keys are stored as `account || key`, matching the host's layout, so code
/// that calls into another account through [`Environment::do_exec`] sees that
/// account's storage. Failed `do_exec` and `atomically` calls roll back both
/// storage and recorded events.
pub struct MockEnv {
    whoami: AccountId,
    sender: AccountId,
    state: HashMap<Vec<u8>, Vec<u8>>,
    events: Vec<Event>,
}

impl MockEnv {
    pub fn new(whoami: AccountId, sender: AccountId) -> Self {
        MockEnv {
            whoami,
            sender,
            state: HashMap::new(),
            events: vec![],
        }
    }

    pub fn with_sender(self, sender: AccountId) -> Self {
        Self { sender, ..self }
    }

    pub fn with_whoami(self, whoami: AccountId) -> Self {
        Self { whoami, ..self }
    }

    pub fn set_sender(&mut self, sender: AccountId) {
        self.sender = sender;
    }

    pub fn set_whoami(&mut self, whoami: AccountId) {
        self.whoami = whoami;
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |event| event.name == name)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of raw storage entries across all accounts.
    pub fn storage_len(&self) -> usize {
        self.state.len()
    }

    /// Runs `f` as `account` with `sender`, restoring the previous identities.
    pub fn act_as<R>(
        &mut self,
        account: AccountId,
        sender: AccountId,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let previous = (self.whoami, self.sender);
        self.whoami = account;
        self.sender = sender;
        let result = f(self);
        (self.whoami, self.sender) = previous;
        result
    }

    fn scoped_key(&self, key: &[u8]) -> Vec<u8> {
        let mut scoped = self.whoami.as_bytes().to_vec();
        scoped.extend_from_slice(key);
        scoped
    }

    fn reverting(&mut self, call: &mut ExecFn<'_>) -> SdkResult<()> {
        let snapshot = self.state.clone();
        let events_len = self.events.len();
        let result = call(self);
        if result.is_err() {
            self.state = snapshot;
            self.events.truncate(events_len);
        }
        result
    }
}

impl Environment for MockEnv {
    fn whoami(&self) -> AccountId {
        self.whoami
    }

    fn sender(&self) -> AccountId {
        self.sender
    }

    fn storage_get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        Ok(self.state.get(&self.scoped_key(key)).cloned())
    }

    fn storage_set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        let key = self.scoped_key(key);
        self.state.insert(key, value);
        Ok(())
    }

    fn storage_remove(&mut self, key: &[u8]) -> SdkResult<()> {
        let key = self.scoped_key(key);
        self.state.remove(&key);
        Ok(())
    }

    fn emit_event(&mut self, name: &str, data: &[u8]) -> SdkResult<()> {
        self.events.push(Event {
            source: self.whoami,
            name: name.to_string(),
            contents: data.to_vec(),
        });
        Ok(())
    }

    fn do_exec(&mut self, to: AccountId, call: &mut ExecFn<'_>) -> SdkResult<()> {
        let caller = self.whoami;
        self.act_as(to, caller, |env| env.reverting(call))
    }

    fn atomically(&mut self, call: &mut ExecFn<'_>) -> SdkResult<()> {
        self.reverting(call)
    }
}
