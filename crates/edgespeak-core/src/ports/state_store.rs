//! Durable key-value storage port.
//!
//! The client persists a handful of small JSON documents (the learned
//! performance state) between sessions. Implementations decide where they
//! live; callers only see string values under fixed keys.

use async_trait::async_trait;

use super::StoreError;

/// Key-value storage for serialized client state.
///
/// # Design Rules
///
/// - Values are opaque strings; (de)serialization belongs to the caller
/// - A missing key is `Ok(None)`, not an error
/// - `write` replaces the previous value as a whole
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
