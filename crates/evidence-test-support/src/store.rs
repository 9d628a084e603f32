//! `KeyValueStore` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use evidence_core::error::DomainError;
use evidence_core::store::KeyValueStore;

/// An in-memory store that keeps documents in a sorted map and records
/// every key written.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    documents: Mutex<BTreeMap<String, serde_json::Value>>,
    writes: Mutex<Vec<String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw document under `key`, bypassing the trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn raw(&self, key: &str) -> Option<serde_json::Value> {
        self.documents.lock().unwrap().get(key).cloned()
    }

    /// Writes a raw document under `key`, bypassing the trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_raw(&self, key: &str, value: serde_json::Value) {
        self.documents.lock().unwrap().insert(key.to_owned(), value);
    }

    /// Returns every key currently stored, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn keys(&self) -> Vec<String> {
        self.documents.lock().unwrap().keys().cloned().collect()
    }

    /// Returns the keys passed to `set`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn written_keys(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Ok(self.documents.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError> {
        self.writes.lock().unwrap().push(key.to_owned());
        self.documents
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.documents.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store that fails every operation with an infrastructure error, as a
/// full or unavailable backend would.
#[derive(Debug)]
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &serde_json::Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("quota exceeded".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }
}

/// An in-memory store whose next reads can be made to fail, as a briefly
/// locked database would. Writes always succeed.
#[derive(Debug, Default)]
pub struct FlakyKeyValueStore {
    inner: MemoryKeyValueStore,
    failing_reads: AtomicUsize,
}

impl FlakyKeyValueStore {
    /// Creates an empty store with no pending failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` calls to `get` fail.
    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let pending = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if pending.is_ok() {
            return Err(DomainError::Infrastructure("database is locked".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.inner.remove(key).await
    }
}
