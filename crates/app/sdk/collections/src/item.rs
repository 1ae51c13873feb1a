use crate::map::Map;
use crate::ERR_NOT_FOUND;
use vouch_core::encoding::{Decodable, Encodable};
use vouch_core::{Environment, SdkResult};

/// A single stored value.
pub struct Item<V>(Map<(), V>);

impl<V> Item<V> {
    pub const fn new(prefix: u8) -> Item<V> {
        Item(Map::new(prefix))
    }
}

impl<V> Item<V>
where
    V: Encodable + Decodable,
{
    /// Returns [`Ok(V)`] if it exists, or [`ERR_NOT_FOUND`].
    pub fn get(&self, env: &dyn Environment) -> SdkResult<V> {
        self.may_get(env)?.ok_or(ERR_NOT_FOUND)
    }

    /// Returns [`Some(V)`] if the item exists, otherwise [`None`].
    pub fn may_get(&self, env: &dyn Environment) -> SdkResult<Option<V>> {
        self.0.may_get(&(), env)
    }

    pub fn set(&self, value: &V, env: &mut dyn Environment) -> SdkResult<()> {
        self.0.set(&(), value, env)
    }

    pub fn update(
        &self,
        update_fn: impl FnOnce(Option<V>) -> SdkResult<V>,
        env: &mut dyn Environment,
    ) -> SdkResult<V> {
        self.0.update(&(), update_fn, env)
    }

    pub fn remove(&self, env: &mut dyn Environment) -> SdkResult<()> {
        self.0.remove(&(), env)
    }
}
