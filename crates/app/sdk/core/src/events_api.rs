use crate::encoding::Decodable;
use crate::{AccountId, SdkResult};
use borsh::{BorshDeserialize, BorshSerialize};

/// An event emitted by account code; `contents` is the borsh-encoded payload.
#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub source: AccountId,
    pub name: String,
    pub contents: Vec<u8>,
}

impl Event {
    /// Decodes the payload as `T`.
    pub fn decode<T: Decodable>(&self) -> SdkResult<T> {
        T::decode(&self.contents)
    }
}
