use std::path::PathBuf;

use futures::future::BoxFuture;
use indexmap::IndexMap;

use super::RsvpBackend;
use crate::dao::{local_json::JsonDocument, models::RsvpEntity, storage::StorageResult};

/// File name of the RSVP document inside the data directory.
pub const RSVP_FILE: &str = "rsvps.json";

/// RSVPs kept in a single JSON object keyed by guest id.
#[derive(Clone)]
pub struct LocalRsvpBackend {
    document: JsonDocument<IndexMap<String, RsvpEntity>>,
}

impl LocalRsvpBackend {
    /// Keep the RSVP object in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }
}

impl RsvpBackend for LocalRsvpBackend {
    fn put(&self, rsvp: RsvpEntity) -> BoxFuture<'static, StorageResult<()>> {
        let document = self.document.clone();
        Box::pin(async move {
            document
                .update(|rsvps| {
                    rsvps.insert(rsvp.guest_id.clone(), rsvp);
                })
                .await
        })
    }

    fn find(&self, guest_id: &str) -> BoxFuture<'static, StorageResult<Option<RsvpEntity>>> {
        let document = self.document.clone();
        let guest_id = guest_id.to_owned();
        Box::pin(async move {
            let mut rsvps = document.load().await?;
            Ok(rsvps.shift_remove(&guest_id))
        })
    }

    fn remove(&self, guest_id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let document = self.document.clone();
        let guest_id = guest_id.to_owned();
        Box::pin(async move {
            let mut rsvps = document.load().await?;
            if rsvps.shift_remove(&guest_id).is_none() {
                return Ok(false);
            }
            document.store(&rsvps).await?;
            Ok(true)
        })
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
