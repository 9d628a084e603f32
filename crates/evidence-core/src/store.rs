//! Key/value store abstraction.
//!
//! The profile layer keeps everything it persists (identity, history,
//! language preference) as JSON documents under string keys. Backends only
//! need to move those documents around.

use async_trait::async_trait;

use crate::error::DomainError;

/// Repository trait for raw JSON documents addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the document stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Store `value` under `key`, replacing any previous document.
    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError>;

    /// Remove the document stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
