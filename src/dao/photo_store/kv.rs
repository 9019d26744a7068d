use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use super::PhotoIndexBackend;
use crate::dao::{
    kv::{KeyValueStore, get_json, set_json},
    models::PhotoEntity,
    storage::StorageResult,
};

/// List key holding photo ids, newest first.
pub const PHOTO_IDS_KEY: &str = "photo-ids";

/// Photo metadata stored as one record per key (`photo:<id>`) plus an ordered
/// id list, since the store cannot enumerate keys by pattern.
#[derive(Clone)]
pub struct KvPhotoIndex {
    kv: Arc<dyn KeyValueStore>,
}

impl KvPhotoIndex {
    /// Store records through `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }
}

pub(crate) fn photo_key(id: &str) -> String {
    format!("photo:{id}")
}

impl PhotoIndexBackend for KvPhotoIndex {
    fn insert(&self, photo: PhotoEntity) -> BoxFuture<'static, StorageResult<()>> {
        let kv = self.kv.clone();
        Box::pin(async move {
            set_json(kv.as_ref(), &photo_key(&photo.id), &photo).await?;
            kv.push_front(PHOTO_IDS_KEY, &photo.id).await
        })
    }

    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<PhotoEntity>>> {
        let kv = self.kv.clone();
        Box::pin(async move {
            let ids = kv.list(PHOTO_IDS_KEY).await?;
            let mut photos = Vec::with_capacity(ids.len());
            for id in ids {
                match get_json::<PhotoEntity>(kv.as_ref(), &photo_key(&id)).await? {
                    Some(photo) => photos.push(photo),
                    None => debug!(%id, "photo id listed without a metadata record; skipping"),
                }
            }
            Ok(photos)
        })
    }

    fn find(&self, id: &str) -> BoxFuture<'static, StorageResult<Option<PhotoEntity>>> {
        let kv = self.kv.clone();
        let key = photo_key(id);
        Box::pin(async move { get_json(kv.as_ref(), &key).await })
    }

    fn remove(&self, id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let kv = self.kv.clone();
        let id = id.to_owned();
        Box::pin(async move {
            let existed = kv.delete(&photo_key(&id)).await?;
            kv.remove_from_list(PHOTO_IDS_KEY, &id).await?;
            Ok(existed)
        })
    }

    fn count(&self) -> BoxFuture<'static, StorageResult<usize>> {
        let kv = self.kv.clone();
        Box::pin(async move { kv.list_len(PHOTO_IDS_KEY).await })
    }

    fn backend_name(&self) -> &'static str {
        "kv"
    }
}
