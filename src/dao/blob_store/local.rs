use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use tokio::fs;

use super::BlobBackend;
use crate::dao::storage::{StorageError, StorageResult};

/// URL prefix under which locally stored binaries are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Binaries written as plain files into an uploads directory.
#[derive(Clone)]
pub struct LocalBlobBackend {
    root: Arc<PathBuf>,
}

impl LocalBlobBackend {
    /// Files are written under `root`, created on first upload.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// Map a `/uploads/<name>` URL back to a file inside the uploads directory.
    ///
    /// Anything else (external URLs, nested or parent paths) has no local file.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(UPLOADS_URL_PREFIX)?;
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." || name == "." {
            return None;
        }
        Some(self.root.join(name))
    }
}

impl BlobBackend for LocalBlobBackend {
    fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> BoxFuture<'static, StorageResult<String>> {
        let root = self.root.clone();
        let file_name = file_name.to_owned();
        Box::pin(async move {
            fs::create_dir_all(&*root).await.map_err(|source| {
                StorageError::unavailable(
                    format!("failed to create uploads directory `{}`", root.display()),
                    source,
                )
            })?;

            let path = root.join(&file_name);
            fs::write(&path, bytes).await.map_err(|source| {
                StorageError::unavailable(format!("failed to write `{}`", path.display()), source)
            })?;

            Ok(format!("{UPLOADS_URL_PREFIX}{file_name}"))
        })
    }

    fn delete(&self, url: &str) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.resolve(url);
        Box::pin(async move {
            let Some(path) = path else {
                return Ok(());
            };
            match fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::unavailable(
                    format!("failed to delete `{}`", path.display()),
                    err,
                )),
            }
        })
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
