use std::sync::Arc;

use futures::future::BoxFuture;

use super::LeaderboardBackend;
use crate::dao::{
    kv::{KeyValueStore, get_json, set_json},
    models::LeaderboardEntryEntity,
    storage::StorageResult,
};

/// Key holding the whole top-10 snapshot.
pub const LEADERBOARD_KEY: &str = "game-leaderboard";

/// Leaderboard stored as one JSON array under [`LEADERBOARD_KEY`].
#[derive(Clone)]
pub struct KvLeaderboardBackend {
    kv: Arc<dyn KeyValueStore>,
}

impl KvLeaderboardBackend {
    /// Scores kept under a single key on `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }
}

impl LeaderboardBackend for KvLeaderboardBackend {
    fn load(&self) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let kv = self.kv.clone();
        Box::pin(async move {
            let entries = get_json::<Vec<LeaderboardEntryEntity>>(kv.as_ref(), LEADERBOARD_KEY)
                .await?
                .unwrap_or_default();
            Ok(entries)
        })
    }

    fn replace(
        &self,
        entries: Vec<LeaderboardEntryEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let kv = self.kv.clone();
        Box::pin(async move { set_json(kv.as_ref(), LEADERBOARD_KEY, &entries).await })
    }

    fn backend_name(&self) -> &'static str {
        "kv"
    }
}
