use hashbrown::HashMap;
use vouch_core::{AccountId, ErrorCode, ReadonlyKV};

/// A committed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Set { key: Vec<u8>, value: Vec<u8> },
    Remove { key: Vec<u8> },
}

impl StateChange {
    pub fn key(&self) -> &[u8] {
        match self {
            StateChange::Set { key, .. } | StateChange::Remove { key } => key,
        }
    }
}

/// In-memory committed store.
///
/// Keys are `account || key`. No persistence, no commitments.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: HashMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_changes(&mut self, changes: Vec<StateChange>) {
        for change in changes {
            match change {
                StateChange::Set { key, value } => {
                    self.state.insert(key, value);
                }
                StateChange::Remove { key } => {
                    self.state.remove(&key);
                }
            }
        }
    }

    /// Reads `key` from `account`'s namespace.
    pub fn get_account(&self, account: AccountId, key: &[u8]) -> Option<&Vec<u8>> {
        self.state.get(&account_key(account, key))
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl ReadonlyKV for MemoryStorage {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, ErrorCode> {
        Ok(self.state.get(key).cloned())
    }
}

pub(crate) fn account_key(account: AccountId, key: &[u8]) -> Vec<u8> {
    let mut scoped = Vec::with_capacity(20 + key.len());
    scoped.extend_from_slice(account.as_bytes());
    scoped.extend_from_slice(key);
    scoped
}
