/// Uploads directory on the local filesystem.
pub mod local;
/// Remote object store reached over HTTP.
#[cfg(feature = "remote-store")]
pub mod remote;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;

pub use local::LocalBlobBackend;
#[cfg(feature = "remote-store")]
pub use remote::{BlobConfig, BlobError, DEFAULT_BLOB_API_URL, RemoteBlobBackend};

/// Storage for photo binaries.
pub trait BlobBackend: Send + Sync {
    /// Store `bytes` under `file_name` and return the URL that references them.
    fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BoxFuture<'static, StorageResult<String>>;
    /// Delete the binary behind `url`. Unknown URLs are not an error.
    fn delete(&self, url: &str) -> BoxFuture<'static, StorageResult<()>>;
    /// Short label reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}
