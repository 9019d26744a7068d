use std::sync::Arc;

use futures::future::BoxFuture;

use super::RsvpBackend;
use crate::dao::{
    kv::{KeyValueStore, get_json, set_json},
    models::RsvpEntity,
    storage::StorageResult,
};

/// RSVPs stored one record per key (`rsvp:<guest id>`).
#[derive(Clone)]
pub struct KvRsvpBackend {
    kv: Arc<dyn KeyValueStore>,
}

impl KvRsvpBackend {
    /// Store records through `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }
}

pub(crate) fn rsvp_key(guest_id: &str) -> String {
    format!("rsvp:{guest_id}")
}

impl RsvpBackend for KvRsvpBackend {
    fn put(&self, rsvp: RsvpEntity) -> BoxFuture<'static, StorageResult<()>> {
        let kv = self.kv.clone();
        Box::pin(async move { set_json(kv.as_ref(), &rsvp_key(&rsvp.guest_id), &rsvp).await })
    }

    fn find(&self, guest_id: &str) -> BoxFuture<'static, StorageResult<Option<RsvpEntity>>> {
        let kv = self.kv.clone();
        let key = rsvp_key(guest_id);
        Box::pin(async move { get_json(kv.as_ref(), &key).await })
    }

    fn remove(&self, guest_id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let kv = self.kv.clone();
        let key = rsvp_key(guest_id);
        Box::pin(async move { kv.delete(&key).await })
    }

    fn backend_name(&self) -> &'static str {
        "kv"
    }
}
