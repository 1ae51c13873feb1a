use hashbrown::HashMap;
use vouch_core::{AccountId, Environment, ErrorCode, ExecFn, SdkResult};

pub const ERR_MOCK_FAILURE: ErrorCode = ErrorCode::new(99);

/// Single-account environment for collection tests.
pub struct MockEnvironment {
    account_id: AccountId,
    sender_id: AccountId,
    storage: HashMap<Vec<u8>, Vec<u8>>,
    should_fail: bool, // Simulate environment failure
}

impl MockEnvironment {
    pub fn new(account_id: u128, sender_id: u128) -> Self {
        Self {
            account_id: AccountId::from_u128(account_id),
            sender_id: AccountId::from_u128(sender_id),
            storage: HashMap::new(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        let mut env = Self::new(1, 2);
        env.should_fail = true;
        env
    }

    fn check(&self) -> SdkResult<()> {
        if self.should_fail {
            return Err(ERR_MOCK_FAILURE);
        }
        Ok(())
    }
}

impl Environment for MockEnvironment {
    fn whoami(&self) -> AccountId {
        self.account_id
    }

    fn sender(&self) -> AccountId {
        self.sender_id
    }

    fn storage_get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        self.check()?;
        Ok(self.storage.get(key).cloned())
    }

    fn storage_set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        self.check()?;
        self.storage.insert(key.to_vec(), value);
        Ok(())
    }

    fn storage_remove(&mut self, key: &[u8]) -> SdkResult<()> {
        self.check()?;
        self.storage.remove(key);
        Ok(())
    }

    fn emit_event(&mut self, _name: &str, _data: &[u8]) -> SdkResult<()> {
        self.check()
    }

    fn do_exec(&mut self, _to: AccountId, _call: &mut ExecFn<'_>) -> SdkResult<()> {
        Err(ErrorCode::new(1))
    }

    fn atomically(&mut self, call: &mut ExecFn<'_>) -> SdkResult<()> {
        let snapshot = self.storage.clone();
        let result = call(self);
        if result.is_err() {
            self.storage = snapshot;
        }
        result
    }
}
