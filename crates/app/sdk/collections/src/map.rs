use crate::ERR_NOT_FOUND;
use std::marker::PhantomData;
use vouch_core::encoding::{Decodable, Encodable};
use vouch_core::{Environment, SdkResult};

pub struct Map<K, V> {
    prefix: u8,
    _kv: PhantomData<(K, V)>,
}

impl<K, V> Map<K, V> {
    pub const fn new(prefix: u8) -> Map<K, V> {
        Map {
            prefix,
            _kv: PhantomData,
        }
    }
}

impl<K, V> Map<K, V>
where
    K: Encodable,
    V: Encodable + Decodable,
{
    pub fn set(&self, key: &K, value: &V, env: &mut dyn Environment) -> SdkResult<()> {
        env.storage_set(&self.make_key(key)?, value.encode()?)
    }

    /// Returns [`Ok(V)`] if the key exists, or [`ERR_NOT_FOUND`].
    pub fn get(&self, key: &K, env: &dyn Environment) -> SdkResult<V> {
        self.may_get(key, env)?.ok_or(ERR_NOT_FOUND)
    }

    pub fn may_get(&self, key: &K, env: &dyn Environment) -> SdkResult<Option<V>> {
        env.storage_get(&self.make_key(key)?)?
            .map(|bytes| V::decode(&bytes))
            .transpose()
    }

    pub fn contains(&self, key: &K, env: &dyn Environment) -> SdkResult<bool> {
        Ok(env.storage_get(&self.make_key(key)?)?.is_some())
    }

    pub fn remove(&self, key: &K, env: &mut dyn Environment) -> SdkResult<()> {
        env.storage_remove(&self.make_key(key)?)
    }

    /// Reads the current value, applies `update_fn` and stores the result.
    ///
    /// Nothing is written when `update_fn` fails.
    pub fn update(
        &self,
        key: &K,
        update_fn: impl FnOnce(Option<V>) -> SdkResult<V>,
        env: &mut dyn Environment,
    ) -> SdkResult<V> {
        let old_value = self.may_get(key, env)?;
        let new_value = update_fn(old_value)?;
        self.set(key, &new_value, env)?;
        Ok(new_value)
    }

    pub fn make_key(&self, key: &K) -> SdkResult<Vec<u8>> {
        let mut key_bytes = vec![self.prefix];
        key_bytes.extend(key.encode()?);
        Ok(key_bytes)
    }
}
