/// Record-per-key backend with an ordered id list.
pub mod kv;
/// JSON file backend.
pub mod local;

use std::sync::Arc;

use futures::future::BoxFuture;
use rand::Rng;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::dao::{blob_store::BlobBackend, models::PhotoEntity, storage::StorageResult};

pub use kv::KvPhotoIndex;
pub use local::LocalPhotoIndex;

/// Mime types accepted for uploads.
pub const ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/heic"];
/// Largest accepted file, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// Largest number of files accepted in one upload batch.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Ordered persistence of photo metadata.
pub trait PhotoIndexBackend: Send + Sync {
    /// Store the record and make it the newest entry.
    fn insert(&self, photo: PhotoEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Every record, newest first.
    fn list(&self) -> BoxFuture<'static, StorageResult<Vec<PhotoEntity>>>;
    /// Record with this id, if any.
    fn find(&self, id: &str) -> BoxFuture<'static, StorageResult<Option<PhotoEntity>>>;
    /// Drop the record and its ordering entry, returning whether the record existed.
    fn remove(&self, id: &str) -> BoxFuture<'static, StorageResult<bool>>;
    /// Number of photos in the gallery.
    fn count(&self) -> BoxFuture<'static, StorageResult<usize>>;
    /// Short label reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Why a file was refused before upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoValidationError {
    /// The mime type is not one of [`ALLOWED_TYPES`].
    #[error("File type {0} not supported. Use JPEG, PNG, WebP, or HEIC.")]
    UnsupportedType(String),
    /// The file exceeds [`MAX_FILE_SIZE`].
    #[error("File too large. Maximum size is 10MB.")]
    TooLarge { size_bytes: u64 },
}

/// Check a file's mime type and size against the upload policy.
pub fn validate(mime_type: &str, size_bytes: u64) -> Result<(), PhotoValidationError> {
    if !ALLOWED_TYPES.contains(&mime_type) {
        return Err(PhotoValidationError::UnsupportedType(mime_type.to_owned()));
    }
    if size_bytes > MAX_FILE_SIZE {
        return Err(PhotoValidationError::TooLarge { size_bytes });
    }
    Ok(())
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<unix millis>-<7 random base36 chars>`: unique enough for an event, not a secret.
pub fn generate_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{millis}-{suffix}")
}

/// Photo gallery operations keeping metadata and binaries paired.
#[derive(Clone)]
pub struct PhotoStore {
    index: Arc<dyn PhotoIndexBackend>,
    blobs: Arc<dyn BlobBackend>,
}

impl PhotoStore {
    /// Pair a metadata backend with a blob backend.
    pub fn new(index: Arc<dyn PhotoIndexBackend>, blobs: Arc<dyn BlobBackend>) -> Self {
        Self { index, blobs }
    }

    /// Label of the metadata backend.
    pub fn index_backend_name(&self) -> &'static str {
        self.index.backend_name()
    }

    /// Label of the blob backend.
    pub fn blob_backend_name(&self) -> &'static str {
        self.blobs.backend_name()
    }

    /// Store the binary, then its metadata as the newest gallery entry.
    ///
    /// If the metadata cannot be written the freshly stored binary is removed
    /// again (best effort) so no orphan is left behind.
    pub async fn save(
        &self,
        bytes: Vec<u8>,
        uploader_name: &str,
        file_name: &str,
        mime_type: &str,
        size_bytes: u64,
    ) -> StorageResult<PhotoEntity> {
        let id = generate_id();
        let stored_name = format!("{id}-{}", sanitize_file_name(file_name));
        let blob_url = self.blobs.put(&stored_name, bytes, mime_type).await?;

        let photo = PhotoEntity {
            id,
            uploader_name: uploader_name.to_owned(),
            file_name: file_name.to_owned(),
            blob_url,
            uploaded_at: OffsetDateTime::now_utc(),
            file_size: size_bytes,
            mime_type: mime_type.to_owned(),
        };

        if let Err(err) = self.index.insert(photo.clone()).await {
            if let Err(cleanup) = self.blobs.delete(&photo.blob_url).await {
                error!(
                    id = %photo.id,
                    blob_url = %photo.blob_url,
                    error = %cleanup,
                    "failed to remove blob after metadata write failure; blob is orphaned"
                );
            }
            return Err(err);
        }

        Ok(photo)
    }

    /// Record a photo whose binary already lives on a third-party host.
    pub async fn save_from_external_url(
        &self,
        url: &str,
        uploader_name: &str,
        file_name: &str,
        size_bytes: u64,
        mime_type: &str,
    ) -> StorageResult<PhotoEntity> {
        let photo = PhotoEntity {
            id: generate_id(),
            uploader_name: uploader_name.to_owned(),
            file_name: file_name.to_owned(),
            blob_url: url.to_owned(),
            uploaded_at: OffsetDateTime::now_utc(),
            file_size: size_bytes,
            mime_type: mime_type.to_owned(),
        };
        self.index.insert(photo.clone()).await?;
        Ok(photo)
    }

    /// Gallery content, newest first.
    pub async fn list_all(&self) -> StorageResult<Vec<PhotoEntity>> {
        self.index.list().await
    }

    /// Photo record for `id`, if any.
    pub async fn get_by_id(&self, id: &str) -> StorageResult<Option<PhotoEntity>> {
        self.index.find(id).await
    }

    /// Number of photos in the gallery.
    pub async fn count(&self) -> StorageResult<usize> {
        self.index.count().await
    }

    /// Remove a photo's binary and metadata. Returns `false` for unknown ids.
    ///
    /// A failed binary deletion is logged and does not stop the metadata
    /// removal; the returned flag reflects the metadata removal only.
    pub async fn delete(&self, id: &str) -> StorageResult<bool> {
        let Some(photo) = self.index.find(id).await? else {
            return Ok(false);
        };

        if let Err(err) = self.blobs.delete(&photo.blob_url).await {
            warn!(
                %id,
                blob_url = %photo.blob_url,
                error = %err,
                "failed to delete photo blob; removing metadata anyway"
            );
        }

        self.index.remove(id).await
    }
}
