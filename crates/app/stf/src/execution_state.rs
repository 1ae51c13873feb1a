use crate::errors::{
    ERR_INVALID_CHECKPOINT, ERR_KEY_TOO_LARGE, ERR_OVERLAY_SIZE_EXCEEDED, ERR_TOO_MANY_EVENTS,
    ERR_VALUE_TOO_LARGE,
};
use crate::storage::StateChange;
use hashbrown::HashMap;
use vouch_core::events_api::Event;
use vouch_core::{ErrorCode, ReadonlyKV, SdkResult};

// Limits on what a single call may accumulate.
const MAX_OVERLAY_ENTRIES: usize = 100_000;
const MAX_EVENTS_PER_EXECUTION: usize = 10_000;
const MAX_KEY_SIZE: usize = 256;
const MAX_VALUE_SIZE: usize = 1024 * 1024;

const INITIAL_OVERLAY_CAPACITY: usize = 64;
const INITIAL_UNDO_LOG_CAPACITY: usize = 32;

/// One overlay mutation, recorded so it can be undone.
///
/// `previous` is `None` when the key had no overlay entry before the change,
/// `Some(None)` when it held a tombstone.
#[derive(Debug)]
struct UndoEntry {
    key: Vec<u8>,
    previous: Option<Option<Vec<u8>>>,
}

impl UndoEntry {
    fn revert(self, overlay: &mut HashMap<Vec<u8>, Option<Vec<u8>>>) {
        match self.previous {
            Some(previous) => {
                overlay.insert(self.key, previous);
            }
            None => {
                overlay.remove(&self.key);
            }
        }
    }
}

/// A point in the execution history that [`ExecutionState::restore`] can
/// roll back to.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    undo_log_index: usize,
    events_index: usize,
}

/// Uncommitted writes of the call in flight, layered over a read-only store.
///
/// The overlay maps a key to:
///  - `Some(value)` => key is set to `value`
///  - `None` => key is removed (tombstone)
///  - no entry => fall back to the underlying store
#[derive(Debug)]
pub struct ExecutionState<'a, S> {
    base_storage: &'a S,
    overlay: HashMap<Vec<u8>, Option<Vec<u8>>>,
    undo_log: Vec<UndoEntry>,
    events: Vec<Event>,
}

impl<'a, S> ExecutionState<'a, S> {
    pub fn new(base_storage: &'a S) -> Self {
        Self {
            base_storage,
            overlay: HashMap::with_capacity(INITIAL_OVERLAY_CAPACITY),
            undo_log: Vec::with_capacity(INITIAL_UNDO_LOG_CAPACITY),
            events: Vec::new(),
        }
    }

    pub fn emit_event(&mut self, event: Event) -> Result<(), ErrorCode> {
        if self.events.len() >= MAX_EVENTS_PER_EXECUTION {
            return Err(ERR_TOO_MANY_EVENTS);
        }
        self.events.push(event);
        Ok(())
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the state, returning the net changes and the emitted events.
    pub fn into_results(self) -> (Vec<StateChange>, Vec<Event>) {
        let changes = self
            .overlay
            .into_iter()
            .map(|(key, maybe_value)| match maybe_value {
                Some(value) => StateChange::Set { key, value },
                None => StateChange::Remove { key },
            })
            .collect();
        (changes, self.events)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            undo_log_index: self.undo_log.len(),
            events_index: self.events.len(),
        }
    }

    /// Rolls the overlay and the event list back to `checkpoint`.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), ErrorCode> {
        if checkpoint.undo_log_index > self.undo_log.len()
            || checkpoint.events_index > self.events.len()
        {
            return Err(ERR_INVALID_CHECKPOINT);
        }

        for change in self.undo_log.drain(checkpoint.undo_log_index..).rev() {
            change.revert(&mut self.overlay);
        }
        self.events.truncate(checkpoint.events_index);
        Ok(())
    }

    fn record(&mut self, key: &[u8], value: Option<Vec<u8>>) -> Result<(), ErrorCode> {
        if key.len() > MAX_KEY_SIZE {
            return Err(ERR_KEY_TOO_LARGE);
        }
        let previous = self.overlay.get(key).cloned();
        if previous.is_none() && self.overlay.len() >= MAX_OVERLAY_ENTRIES {
            return Err(ERR_OVERLAY_SIZE_EXCEEDED);
        }
        self.undo_log.push(UndoEntry {
            key: key.to_vec(),
            previous,
        });
        self.overlay.insert(key.to_vec(), value);
        Ok(())
    }
}

impl<S: ReadonlyKV> ExecutionState<'_, S> {
    /// Retrieves the logical value for `key`: the overlay first, then the
    /// underlying store.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, ErrorCode> {
        match self.overlay.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.base_storage.get(key),
        }
    }

    pub fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), ErrorCode> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(ERR_VALUE_TOO_LARGE);
        }
        self.record(key, Some(value))
    }

    pub fn remove(&mut self, key: &[u8]) -> Result<(), ErrorCode> {
        self.record(key, None)
    }
}

impl<S: ReadonlyKV> ReadonlyKV for ExecutionState<'_, S> {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        ExecutionState::get(self, key)
    }
}
