//! In-process key-value double used to exercise the remote store layouts in tests.

use std::{
    collections::VecDeque,
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use dashmap::DashMap;
use futures::future::BoxFuture;
use serde_json::Value;

use super::KeyValueStore;
use crate::dao::storage::{StorageError, StorageResult};

/// Key-value store held in process memory. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryKv {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    values: DashMap<String, Value>,
    lists: DashMap<String, VecDeque<String>>,
    offline: AtomicBool,
}

impl MemoryKv {
    /// Empty and online.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Stored value, bypassing the offline switch.
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.inner.values.get(key).map(|entry| entry.value().clone())
    }

    /// Stored list, head first, bypassing the offline switch.
    pub fn raw_list(&self, key: &str) -> Vec<String> {
        self.inner
            .lists
            .get(key)
            .map(|entry| entry.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn check(&self) -> StorageResult<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(
                "memory kv offline".into(),
                io::Error::new(io::ErrorKind::ConnectionRefused, "offline"),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let kv = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            kv.check()?;
            Ok(kv.raw(&key))
        })
    }

    fn set(&self, key: &str, value: Value) -> BoxFuture<'static, StorageResult<()>> {
        let kv = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            kv.check()?;
            kv.inner.values.insert(key, value);
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let kv = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            kv.check()?;
            let removed_value = kv.inner.values.remove(&key).is_some();
            let removed_list = kv.inner.lists.remove(&key).is_some();
            Ok(removed_value || removed_list)
        })
    }

    fn push_front(&self, key: &str, member: &str) -> BoxFuture<'static, StorageResult<()>> {
        let kv = self.clone();
        let key = key.to_owned();
        let member = member.to_owned();
        Box::pin(async move {
            kv.check()?;
            kv.inner.lists.entry(key).or_default().push_front(member);
            Ok(())
        })
    }

    fn list(&self, key: &str) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let kv = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            kv.check()?;
            Ok(kv.raw_list(&key))
        })
    }

    fn remove_from_list(
        &self,
        key: &str,
        member: &str,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let kv = self.clone();
        let key = key.to_owned();
        let member = member.to_owned();
        Box::pin(async move {
            kv.check()?;
            let Some(mut list) = kv.inner.lists.get_mut(&key) else {
                return Ok(false);
            };
            match list.iter().position(|candidate| *candidate == member) {
                Some(index) => {
                    list.remove(index);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    fn list_len(&self, key: &str) -> BoxFuture<'static, StorageResult<usize>> {
        let kv = self.clone();
        let key = key.to_owned();
        Box::pin(async move {
            kv.check()?;
            Ok(kv.inner.lists.get(&key).map(|l| l.len()).unwrap_or(0))
        })
    }

    fn ping(&self) -> BoxFuture<'static, StorageResult<()>> {
        let kv = self.clone();
        Box::pin(async move { kv.check() })
    }
}
