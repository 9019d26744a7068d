//! Object-storage client for photo binaries.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::BlobBackend;
use crate::dao::storage::{StorageError, StorageResult};

/// Public endpoint used when `BLOB_API_URL` is not set.
pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";
const API_VERSION: &str = "7";
const PATH_PREFIX: &str = "photos/";

/// Failures that can occur while talking to the object store.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Building the HTTP client failed.
    #[error("failed to build blob client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent.
    #[error("failed to send blob request for `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The object store answered with a non-success status.
    #[error("unexpected blob response status {status} for `{path}`")]
    RequestStatus { path: String, status: StatusCode },
    /// The upload response could not be decoded.
    #[error("failed to decode blob response for `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<BlobError> for StorageError {
    fn from(err: BlobError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}

/// Runtime configuration describing how to reach the object store.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub api_url: String,
    pub token: String,
}

impl BlobConfig {
    /// Construct a configuration from an endpoint and a read-write token.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PutBlobResponse {
    url: String,
}

/// Photo binaries uploaded as public objects under `photos/`.
#[derive(Clone)]
pub struct RemoteBlobBackend {
    client: Client,
    api_url: Arc<str>,
    token: Arc<str>,
}

impl RemoteBlobBackend {
    /// Build the HTTP client. No request is sent until the first upload.
    pub fn connect(config: BlobConfig) -> Result<Self, BlobError> {
        let client = Client::builder()
            .build()
            .map_err(|source| BlobError::ClientBuilder { source })?;

        Ok(Self {
            client,
            api_url: Arc::from(config.api_url.trim_end_matches('/')),
            token: Arc::from(config.token),
        })
    }

    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        let path = format!("{PATH_PREFIX}{file_name}");
        let response = self
            .client
            .put(format!("{}/{}", self.api_url, path))
            .bearer_auth(&*self.token)
            .header("x-api-version", API_VERSION)
            .header("x-content-type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|source| BlobError::RequestSend {
                path: path.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(BlobError::RequestStatus {
                path,
                status: response.status(),
            });
        }

        let payload = response
            .json::<PutBlobResponse>()
            .await
            .map_err(|source| BlobError::DecodeResponse { path, source })?;
        Ok(payload.url)
    }

    async fn remove(&self, url: &str) -> Result<(), BlobError> {
        let response = self
            .client
            .post(format!("{}/delete", self.api_url))
            .bearer_auth(&*self.token)
            .header("x-api-version", API_VERSION)
            .json(&json!({ "urls": [url] }))
            .send()
            .await
            .map_err(|source| BlobError::RequestSend {
                path: url.to_owned(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BlobError::RequestStatus {
                path: url.to_owned(),
                status: response.status(),
            })
        }
    }
}

impl BlobBackend for RemoteBlobBackend {
    fn put(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BoxFuture<'static, StorageResult<String>> {
        let backend = self.clone();
        let file_name = file_name.to_owned();
        let content_type = content_type.to_owned();
        Box::pin(async move {
            backend
                .upload(&file_name, bytes, &content_type)
                .await
                .map_err(Into::into)
        })
    }

    fn delete(&self, url: &str) -> BoxFuture<'static, StorageResult<()>> {
        let backend = self.clone();
        let url = url.to_owned();
        Box::pin(async move { backend.remove(&url).await.map_err(Into::into) })
    }

    fn backend_name(&self) -> &'static str {
        "blob"
    }
}
