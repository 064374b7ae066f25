//! Persistence port: the coordinator only ever needs "get a string by key"
//! and "set a string by key". The concrete storage medium is a collaborator
//! concern.

use std::collections::HashMap;

/// Well-known key the coordinator saves the puzzle state under.
pub const SAVED_STATE_KEY: &str = "trisk.state";

/// Injected string key-value store.
pub trait KvStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store, for tests and storage-less deployments.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore(HashMap<String, String>);
impl MemoryStore {
    /// Constructs an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}
impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_owned(), value);
    }
}
