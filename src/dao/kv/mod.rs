//! Remote key-value backend shared by the RSVP, photo and leaderboard stores.

/// In-memory double for tests.
#[cfg(test)]
pub mod memory;
/// HTTP client for the hosted key-value service.
#[cfg(feature = "remote-store")]
pub mod rest;

use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::dao::storage::{StorageError, StorageResult};

/// Minimal set of key-value primitives the remote stores rely on.
///
/// Single-key operations are expected to be atomic on the server. The store
/// offers no "list keys by pattern" primitive, which is why ordered
/// enumeration is modelled with explicit list keys.
pub trait KeyValueStore: Send + Sync {
    /// Value stored at `key`, or `None` when the key does not exist.
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<Value>>>;
    /// Store `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove a key, returning whether it existed.
    fn delete(&self, key: &str) -> BoxFuture<'static, StorageResult<bool>>;
    /// Prepend a member to the list stored at `key`.
    fn push_front(&self, key: &str, member: &str) -> BoxFuture<'static, StorageResult<()>>;
    /// Return the whole list stored at `key`, head first.
    fn list(&self, key: &str) -> BoxFuture<'static, StorageResult<Vec<String>>>;
    /// Remove the first occurrence of `member`, returning whether one was found.
    fn remove_from_list(&self, key: &str, member: &str)
    -> BoxFuture<'static, StorageResult<bool>>;
    /// Number of members in the list stored at `key` (zero when absent).
    fn list_len(&self, key: &str) -> BoxFuture<'static, StorageResult<usize>>;
    /// Round-trip to the server without touching any key.
    fn ping(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Fetch and decode a JSON document.
pub async fn get_json<T>(kv: &dyn KeyValueStore, key: &str) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
{
    match kv.get(key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StorageError::corrupted(format!("failed to decode `{key}`"), source)),
        None => Ok(None),
    }
}

/// Encode and store a JSON document, replacing any previous value.
pub async fn set_json<T>(kv: &dyn KeyValueStore, key: &str, document: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(document)
        .map_err(|source| StorageError::corrupted(format!("failed to encode `{key}`"), source))?;
    kv.set(key, value).await
}
