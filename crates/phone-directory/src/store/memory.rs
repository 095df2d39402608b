//! In-memory store backend.

use crate::directory::PhoneKey;
use crate::error::DirectoryError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory key-value store with the same single-key contract as the
/// networked backend: the write lock makes each conditional write atomic.
/// Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &PhoneKey) -> Result<Option<String>, DirectoryError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key.as_str()).cloned())
    }

    pub async fn set_if_absent(
        &self,
        key: &PhoneKey,
        value: &str,
    ) -> Result<bool, DirectoryError> {
        let mut entries = self.entries.write().await;
        match entries.entry(key.as_str().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(true)
            }
        }
    }

    pub async fn set_if_exists(
        &self,
        key: &PhoneKey,
        value: &str,
    ) -> Result<bool, DirectoryError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(key.as_str()) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn delete(&self, key: &PhoneKey) -> Result<bool, DirectoryError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key.as_str()).is_some())
    }

    pub async fn ping(&self) -> bool {
        true
    }
}
