use crate::claim::ClaimId;
use vouch_collections::map::Map;
use vouch_core::{Environment, SdkResult};

/// Persistent set of consumed claim ids, kept in the voucher account.
///
/// Entries are only ever added.
pub struct ReplayGuard {
    used: Map<ClaimId, bool>,
}

impl ReplayGuard {
    pub const fn new(prefix: u8) -> Self {
        Self {
            used: Map::new(prefix),
        }
    }

    pub fn is_used(&self, claim_id: ClaimId, env: &dyn Environment) -> SdkResult<bool> {
        Ok(self.used.may_get(&claim_id, env)?.unwrap_or(false))
    }

    /// Records `claim_id`. Returns `false`, changing nothing, if it was
    /// already recorded.
    pub fn mark_used(&self, claim_id: ClaimId, env: &mut dyn Environment) -> SdkResult<bool> {
        if self.is_used(claim_id, env)? {
            return Ok(false);
        }
        self.used.set(&claim_id, &true, env)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vouch_core::AccountId;
    use vouch_testing::MockEnv;

    fn env() -> MockEnv {
        MockEnv::new(AccountId::from_u128(1), AccountId::from_u128(2))
    }

    #[test]
    fn test_mark_once() {
        let guard = ReplayGuard::new(0);
        let mut env = env();
        let id = ClaimId::from(1u64);

        assert!(!guard.is_used(id, &env).unwrap());
        assert!(guard.mark_used(id, &mut env).unwrap());
        assert!(guard.is_used(id, &env).unwrap());
        assert!(!guard.mark_used(id, &mut env).unwrap());
        assert!(!guard.is_used(ClaimId::from(2u64), &env).unwrap());
    }

    #[test]
    fn test_guards_with_different_prefixes_are_independent() {
        let first = ReplayGuard::new(0);
        let second = ReplayGuard::new(1);
        let mut env = env();
        let id = ClaimId::from(5u64);

        first.mark_used(id, &mut env).unwrap();
        assert!(!second.is_used(id, &env).unwrap());
    }

    #[test]
    fn test_second_mark_writes_nothing() {
        let guard = ReplayGuard::new(0);
        let mut env = env();
        let id = ClaimId::from(7u64);

        guard.mark_used(id, &mut env).unwrap();
        let entries = env.storage_len();
        guard.mark_used(id, &mut env).unwrap();
        assert_eq!(env.storage_len(), entries);
    }
}
