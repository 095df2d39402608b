//! Key-value store backends for directory entries.
//!
//! The store is the sole owner of directory state; the service keeps no
//! cache. Every backend offers the same single-key primitives, and the
//! conditional writes are atomic at the store - that atomicity is what
//! Create and Replace rely on, with no locking in the service layer.

mod memory;
mod redis;

pub use self::redis::RedisStore;
pub use memory::MemoryStore;

use crate::config::StoreConfig;
use crate::directory::PhoneKey;
use crate::error::DirectoryError;

/// Storage backend for directory entries.
pub enum Store {
    /// Networked key-value store
    Redis(RedisStore),
    /// In-memory only (tests, store-less local runs)
    Memory(MemoryStore),
}

impl Store {
    /// Connect to the configured key-value store.
    pub async fn connect(config: &StoreConfig) -> Result<Self, DirectoryError> {
        Ok(Store::Redis(RedisStore::connect(config).await?))
    }

    /// Force an in-memory store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// Fetch the address stored under a key.
    pub async fn get(&self, key: &PhoneKey) -> Result<Option<String>, DirectoryError> {
        match self {
            Store::Redis(s) => s.get(key).await,
            Store::Memory(s) => s.get(key).await,
        }
    }

    /// Write a value only if the key is currently absent, atomically.
    /// Returns whether the write happened.
    pub async fn set_if_absent(
        &self,
        key: &PhoneKey,
        value: &str,
    ) -> Result<bool, DirectoryError> {
        match self {
            Store::Redis(s) => s.set_if_absent(key, value).await,
            Store::Memory(s) => s.set_if_absent(key, value).await,
        }
    }

    /// Write a value only if the key currently holds one, atomically.
    /// Returns whether the write happened.
    pub async fn set_if_exists(
        &self,
        key: &PhoneKey,
        value: &str,
    ) -> Result<bool, DirectoryError> {
        match self {
            Store::Redis(s) => s.set_if_exists(key, value).await,
            Store::Memory(s) => s.set_if_exists(key, value).await,
        }
    }

    /// Remove a key. Returns whether an entry existed.
    pub async fn delete(&self, key: &PhoneKey) -> Result<bool, DirectoryError> {
        match self {
            Store::Redis(s) => s.delete(key).await,
            Store::Memory(s) => s.delete(key).await,
        }
    }

    /// Probe the backend for liveness.
    pub async fn ping(&self) -> bool {
        match self {
            Store::Redis(s) => s.ping().await,
            Store::Memory(s) => s.ping().await,
        }
    }
}
