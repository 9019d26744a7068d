/// Record-per-key backend.
pub mod kv;
/// JSON file backend.
pub mod local;

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use time::OffsetDateTime;

use crate::dao::{
    directory::GuestDirectory,
    models::{GuestWithRsvpEntity, RsvpEntity},
    storage::{StorageError, StorageResult},
};

pub use kv::KvRsvpBackend;
pub use local::LocalRsvpBackend;

/// Persistence primitives for RSVP records, keyed by guest id.
pub trait RsvpBackend: Send + Sync {
    /// Insert or overwrite the record for `rsvp.guest_id`.
    fn put(&self, rsvp: RsvpEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Response of `guest_id`, if one was stored.
    fn find(&self, guest_id: &str) -> BoxFuture<'static, StorageResult<Option<RsvpEntity>>>;
    /// Delete the record, returning whether one existed.
    fn remove(&self, guest_id: &str) -> BoxFuture<'static, StorageResult<bool>>;
    /// Short label reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Reasons an RSVP submission can be refused.
#[derive(Debug, Error)]
pub enum RsvpError {
    /// No guest with this id in the directory.
    #[error("guest `{0}` not found")]
    UnknownGuest(String),
    /// Confirmed seats outside `0..=max`.
    #[error("Seats must be between 0 and {max}")]
    SeatsOutOfRange { seats: i64, max: u32 },
    /// The backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// RSVP operations layered on a backend and the guest directory.
#[derive(Clone)]
pub struct RsvpStore {
    backend: Arc<dyn RsvpBackend>,
    directory: Arc<GuestDirectory>,
}

impl RsvpStore {
    /// Build a store over `backend`, validating guests against `directory`.
    pub fn new(backend: Arc<dyn RsvpBackend>, directory: Arc<GuestDirectory>) -> Self {
        Self { backend, directory }
    }

    pub fn directory(&self) -> &GuestDirectory {
        &self.directory
    }

    /// Label of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Validate and persist a guest's response, replacing any earlier one.
    ///
    /// `respondedAt` is stamped on every call and the guest name is copied
    /// from the directory. Nothing is written when validation fails.
    pub async fn upsert(
        &self,
        guest_id: &str,
        seats_confirmed: i64,
        dietary_restrictions: &str,
    ) -> Result<RsvpEntity, RsvpError> {
        let guest = self
            .directory
            .get_by_id(guest_id)
            .ok_or_else(|| RsvpError::UnknownGuest(guest_id.to_owned()))?;

        let seats = u32::try_from(seats_confirmed)
            .ok()
            .filter(|seats| *seats <= guest.seats_allocated)
            .ok_or(RsvpError::SeatsOutOfRange {
                seats: seats_confirmed,
                max: guest.seats_allocated,
            })?;

        let rsvp = RsvpEntity {
            guest_id: guest.id.clone(),
            guest_name: guest.name.clone(),
            seats_confirmed: seats,
            dietary_restrictions: dietary_restrictions.to_owned(),
            responded_at: OffsetDateTime::now_utc(),
        };

        self.backend.put(rsvp.clone()).await?;
        Ok(rsvp)
    }

    /// Stored response of `guest_id`, if any.
    pub async fn get_by_guest_id(&self, guest_id: &str) -> StorageResult<Option<RsvpEntity>> {
        self.backend.find(guest_id).await
    }

    /// Every directory guest merged with its response, in directory order.
    ///
    /// Performs one lookup per guest; sized for a guest list, not for scale.
    pub async fn list_all_joined(&self) -> StorageResult<Vec<GuestWithRsvpEntity>> {
        let mut joined = Vec::with_capacity(self.directory.len());
        for guest in self.directory.list() {
            let rsvp = self.backend.find(&guest.id).await?;
            joined.push(GuestWithRsvpEntity::join(guest, rsvp));
        }
        Ok(joined)
    }

    /// Existing responses in directory order.
    pub async fn list_all(&self) -> StorageResult<Vec<RsvpEntity>> {
        let mut responses = Vec::new();
        for guest in self.directory.list() {
            if let Some(rsvp) = self.backend.find(&guest.id).await? {
                responses.push(rsvp);
            }
        }
        Ok(responses)
    }

    /// Delete the response of every directory guest and return how many existed.
    pub async fn clear_all(&self) -> StorageResult<usize> {
        let mut deleted = 0;
        for guest in self.directory.list() {
            if self.backend.remove(&guest.id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{
        directory::{directory_of, guest},
        kv::memory::MemoryKv,
    };

    fn directory() -> Arc<GuestDirectory> {
        Arc::new(directory_of(vec![
            guest("g1", "Alice", 3),
            guest("g2", "Bob", 1),
            guest("g3", "Chloé", 2),
        ]))
    }

    fn local_store(dir: &tempfile::TempDir) -> RsvpStore {
        let backend = LocalRsvpBackend::new(dir.path().join(local::RSVP_FILE));
        RsvpStore::new(Arc::new(backend), directory())
    }

    #[tokio::test]
    async fn upsert_then_fetch_returns_same_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);

        let stored = store.upsert("g1", 2, "vegan").await.unwrap();
        assert_eq!(stored.guest_id, "g1");
        assert_eq!(stored.guest_name, "Alice");
        assert_eq!(stored.seats_confirmed, 2);
        assert_eq!(stored.dietary_restrictions, "vegan");

        let fetched = store.get_by_guest_id("g1").await.unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn out_of_range_seats_are_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        store.upsert("g1", 1, "").await.unwrap();

        let err = store.upsert("g1", 5, "").await.unwrap_err();
        assert_eq!(err.to_string(), "Seats must be between 0 and 3");
        assert!(matches!(store.upsert("g1", -1, "").await, Err(RsvpError::SeatsOutOfRange { .. })));

        let kept = store.get_by_guest_id("g1").await.unwrap().unwrap();
        assert_eq!(kept.seats_confirmed, 1);
    }

    #[tokio::test]
    async fn zero_and_full_allocation_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        assert_eq!(store.upsert("g1", 0, "").await.unwrap().seats_confirmed, 0);
        assert_eq!(store.upsert("g1", 3, "").await.unwrap().seats_confirmed, 3);
    }

    #[tokio::test]
    async fn unknown_guest_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        assert!(matches!(
            store.upsert("ghost", 0, "").await,
            Err(RsvpError::UnknownGuest(id)) if id == "ghost"
        ));
        assert!(!dir.path().join(local::RSVP_FILE).exists());
    }

    #[tokio::test]
    async fn second_upsert_overwrites_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);

        let first = store.upsert("g1", 1, "none").await.unwrap();
        let second = store.upsert("g1", 3, "gluten free").await.unwrap();
        assert!(second.responded_at >= first.responded_at);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].seats_confirmed, 3);
        assert_eq!(all[0].dietary_restrictions, "gluten free");
    }

    #[tokio::test]
    async fn joined_list_nulls_missing_responses() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        store.upsert("g2", 1, "vegetarian").await.unwrap();

        let joined = store.list_all_joined().await.unwrap();
        assert_eq!(joined.len(), 3);
        assert_eq!(joined[0].seats_confirmed, None);
        assert_eq!(joined[0].responded_at, None);
        assert_eq!(joined[0].dietary_restrictions, "");
        assert_eq!(joined[1].seats_confirmed, Some(1));
        assert_eq!(joined[1].dietary_restrictions, "vegetarian");
        assert!(joined[1].responded_at.is_some());
    }

    #[tokio::test]
    async fn clear_all_counts_existing_records_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        store.upsert("g1", 2, "").await.unwrap();
        store.upsert("g3", 0, "").await.unwrap();

        assert_eq!(store.clear_all().await.unwrap(), 2);
        assert!(
            store
                .list_all_joined()
                .await
                .unwrap()
                .iter()
                .all(|g| g.responded_at.is_none())
        );
        assert_eq!(store.clear_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn local_file_is_keyed_by_guest_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        store.upsert("g1", 2, "vegan").await.unwrap();

        let raw: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(local::RSVP_FILE)).unwrap(),
        )
        .unwrap();
        let record = &raw["g1"];
        assert_eq!(record["guestId"], "g1");
        assert_eq!(record["guestName"], "Alice");
        assert_eq!(record["seatsConfirmed"], 2);
        assert_eq!(record["dietaryRestrictions"], "vegan");
        assert!(record["respondedAt"].is_string());
    }

    #[tokio::test]
    async fn kv_backend_uses_one_key_per_guest() {
        let kv = MemoryKv::new();
        let store = RsvpStore::new(Arc::new(KvRsvpBackend::new(Arc::new(kv.clone()))), directory());

        store.upsert("g1", 2, "vegan").await.unwrap();
        let raw = kv.raw("rsvp:g1").unwrap();
        assert_eq!(raw["seatsConfirmed"], 2);

        store.upsert("g2", 1, "").await.unwrap();
        assert_eq!(store.clear_all().await.unwrap(), 2);
        assert!(kv.raw("rsvp:g1").is_none());
    }

    #[tokio::test]
    async fn unreachable_kv_surfaces_storage_error() {
        let kv = MemoryKv::new();
        let store = RsvpStore::new(Arc::new(KvRsvpBackend::new(Arc::new(kv.clone()))), directory());
        kv.set_offline(true);

        assert!(matches!(
            store.list_all_joined().await,
            Err(StorageError::Unavailable { .. })
        ));
        assert!(matches!(
            store.upsert("g1", 1, "").await,
            Err(RsvpError::Storage(_))
        ));
    }
}
