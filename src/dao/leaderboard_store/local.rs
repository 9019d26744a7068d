use std::path::PathBuf;

use futures::future::BoxFuture;

use super::LeaderboardBackend;
use crate::dao::{
    local_json::JsonDocument, models::LeaderboardEntryEntity, storage::StorageResult,
};

/// File name of the leaderboard document inside the data directory.
pub const LEADERBOARD_FILE: &str = "leaderboard.json";

/// Leaderboard kept in a JSON file holding the top-10 array.
#[derive(Clone)]
pub struct LocalLeaderboardBackend {
    document: JsonDocument<Vec<LeaderboardEntryEntity>>,
}

impl LocalLeaderboardBackend {
    /// Scores kept in the JSON file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }
}

impl LeaderboardBackend for LocalLeaderboardBackend {
    fn load(&self) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let document = self.document.clone();
        Box::pin(async move { document.load().await })
    }

    fn replace(
        &self,
        entries: Vec<LeaderboardEntryEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let document = self.document.clone();
        Box::pin(async move { document.store(&entries).await })
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
