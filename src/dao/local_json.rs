//! Whole-document JSON files used by the local fallback backends.
//!
//! Every mutation reads the full document, changes it in memory and writes it
//! back. Nothing serialises concurrent writers, so two racing requests can lose
//! an update; the fallback is meant for development and low traffic.

use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::dao::storage::{StorageError, StorageResult};

/// Typed handle on a JSON file holding a single document of type `T`.
pub struct JsonDocument<T> {
    path: Arc<Path>,
    _document: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonDocument<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _document: PhantomData,
        }
    }
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Point the handle at `path`. The file is only touched on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::from(path.into()),
            _document: PhantomData,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, returning `T::default()` when the file does not exist yet.
    pub async fn load(&self) -> StorageResult<T> {
        let contents = match fs::read(&*self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => {
                return Err(StorageError::unavailable(
                    format!("failed to read `{}`", self.path.display()),
                    err,
                ));
            }
        };

        serde_json::from_slice(&contents).map_err(|source| {
            StorageError::corrupted(format!("failed to parse `{}`", self.path.display()), source)
        })
    }

    /// Replace the whole document on disk.
    pub async fn store(&self, document: &T) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| {
                StorageError::unavailable(
                    format!("failed to create directory `{}`", parent.display()),
                    source,
                )
            })?;
        }

        let payload = serde_json::to_vec_pretty(document).map_err(|source| {
            StorageError::corrupted(
                format!("failed to encode `{}`", self.path.display()),
                source,
            )
        })?;

        fs::write(&*self.path, payload).await.map_err(|source| {
            StorageError::unavailable(format!("failed to write `{}`", self.path.display()), source)
        })
    }

    /// Load, mutate and store the document, returning whatever `update` produced.
    pub async fn update<R>(&self, update: impl FnOnce(&mut T) -> R) -> StorageResult<R> {
        let mut document = self.load().await?;
        let result = update(&mut document);
        self.store(&document).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[tokio::test]
    async fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let doc = JsonDocument::<Vec<String>>::new(dir.path().join("absent.json"));
        assert!(doc.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_creates_parent_directories_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let doc = JsonDocument::<BTreeMap<String, u32>>::new(dir.path().join("nested/doc.json"));

        doc.update(|map| map.insert("g1".into(), 2)).await.unwrap();

        let raw = std::fs::read_to_string(doc.path()).unwrap();
        assert_eq!(raw, "{\n  \"g1\": 2\n}");
        assert_eq!(doc.load().await.unwrap().get("g1"), Some(&2));
    }

    #[tokio::test]
    async fn garbage_is_reported_as_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let doc = JsonDocument::<Vec<String>>::new(path);
        assert!(matches!(
            doc.load().await,
            Err(StorageError::Corrupted { .. })
        ));
    }
}
