use std::path::PathBuf;

use futures::future::BoxFuture;

use super::PhotoIndexBackend;
use crate::dao::{local_json::JsonDocument, models::PhotoEntity, storage::StorageResult};

/// File name of the photo metadata document inside the data directory.
pub const PHOTOS_FILE: &str = "photos.json";

/// Photo metadata kept as a newest-first JSON array.
#[derive(Clone)]
pub struct LocalPhotoIndex {
    document: JsonDocument<Vec<PhotoEntity>>,
}

impl LocalPhotoIndex {
    /// Keep the metadata array in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }
}

impl PhotoIndexBackend for LocalPhotoIndex {
    fn insert(&self, photo: PhotoEntity) -> BoxFuture<'static, StorageResult<()>> {
        let document = self.document.clone();
        Box::pin(async move { document.update(|photos| photos.insert(0, photo)).await })
    }

    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<PhotoEntity>>> {
        let document = self.document.clone();
        Box::pin(async move { document.load().await })
    }

    fn find(&self, id: &str) -> BoxFuture<'static, StorageResult<Option<PhotoEntity>>> {
        let document = self.document.clone();
        let id = id.to_owned();
        Box::pin(async move {
            let photos = document.load().await?;
            Ok(photos.into_iter().find(|photo| photo.id == id))
        })
    }

    fn remove(&self, id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let document = self.document.clone();
        let id = id.to_owned();
        Box::pin(async move {
            let mut photos = document.load().await?;
            let before = photos.len();
            photos.retain(|photo| photo.id != id);
            if photos.len() == before {
                return Ok(false);
            }
            document.store(&photos).await?;
            Ok(true)
        })
    }

    fn count(&self) -> BoxFuture<'static, StorageResult<usize>> {
        let document = self.document.clone();
        Box::pin(async move { Ok(document.load().await?.len()) })
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
