/// Remote snapshot backend.
pub mod kv;
/// JSON file backend.
pub mod local;

use std::sync::Arc;

use futures::future::BoxFuture;
use time::OffsetDateTime;

use crate::dao::{models::LeaderboardEntryEntity, storage::StorageResult};

pub use kv::KvLeaderboardBackend;
pub use local::LocalLeaderboardBackend;

/// Number of entries kept on the board.
pub const MAX_ENTRIES: usize = 10;
/// Nicknames are cut to this many characters.
pub const MAX_NICKNAME_LEN: usize = 20;

/// Whole-document persistence of the leaderboard snapshot.
pub trait LeaderboardBackend: Send + Sync {
    /// Current board, best score first. Empty when nothing was stored yet.
    fn load(&self) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>>;
    /// Replace the stored snapshot with `entries`.
    fn replace(&self, entries: Vec<LeaderboardEntryEntity>)
    -> BoxFuture<'static, StorageResult<()>>;
    /// Short label reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Top-10 minigame scores.
///
/// Every submission rewrites the whole snapshot, so two submissions racing
/// each other can lose one of the scores.
#[derive(Clone)]
pub struct LeaderboardStore {
    backend: Arc<dyn LeaderboardBackend>,
}

impl LeaderboardStore {
    /// Wrap the backend chosen at start-up.
    pub fn new(backend: Arc<dyn LeaderboardBackend>) -> Self {
        Self { backend }
    }

    /// Label of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Current board, best score first.
    pub async fn get_top(&self) -> StorageResult<Vec<LeaderboardEntryEntity>> {
        self.backend.load().await
    }

    /// Insert a score, keep the best ten and persist the result.
    pub async fn submit(
        &self,
        nickname: &str,
        score: i64,
    ) -> StorageResult<Vec<LeaderboardEntryEntity>> {
        let mut entries = self.backend.load().await?;
        entries.push(LeaderboardEntryEntity {
            nickname: truncate_nickname(nickname),
            score,
            date: OffsetDateTime::now_utc(),
        });
        // Stable: equal scores keep their arrival order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);

        self.backend.replace(entries.clone()).await?;
        Ok(entries)
    }
}

/// Keep at most [`MAX_NICKNAME_LEN`] characters.
pub fn truncate_nickname(nickname: &str) -> String {
    nickname.chars().take(MAX_NICKNAME_LEN).collect()
}

/// 1-based position of the first entry matching `nickname` and `score`.
///
/// Exact ties on both fields resolve to the earliest entry in list order.
pub fn rank_of(entries: &[LeaderboardEntryEntity], nickname: &str, score: i64) -> Option<usize> {
    let nickname = truncate_nickname(nickname);
    entries
        .iter()
        .position(|entry| entry.nickname == nickname && entry.score == score)
        .map(|index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::kv::memory::MemoryKv;

    fn local_store(dir: &tempfile::TempDir) -> LeaderboardStore {
        LeaderboardStore::new(Arc::new(LocalLeaderboardBackend::new(
            dir.path().join(local::LEADERBOARD_FILE),
        )))
    }

    #[tokio::test]
    async fn empty_board_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(local_store(&dir).get_top().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn eleven_submissions_keep_top_ten_descending() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);

        for score in [40, 5, 90, 10, 70, 20, 100, 60, 30, 80, 50] {
            store.submit(&format!("p{score}"), score).await.unwrap();
        }

        let board = store.get_top().await.unwrap();
        let scores: Vec<_> = board.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
    }

    #[tokio::test]
    async fn low_score_on_full_board_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        for score in 1..=10 {
            store.submit("p", score * 10).await.unwrap();
        }
        let before = store.get_top().await.unwrap();

        let after = store.submit("late", 5).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(store.get_top().await.unwrap(), before);
    }

    #[tokio::test]
    async fn nickname_is_cut_to_twenty_characters() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        let board = store
            .submit("abcdefghijklmnopqrstuvwxyz", 10)
            .await
            .unwrap();
        assert_eq!(board[0].nickname, "abcdefghijklmnopqrst");
    }

    #[tokio::test]
    async fn ties_keep_arrival_order_and_rank_picks_first_match() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir);
        store.submit("ana", 30).await.unwrap();
        store.submit("bo", 30).await.unwrap();
        let board = store.submit("ana", 30).await.unwrap();

        let names: Vec<_> = board.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, vec!["ana", "bo", "ana"]);
        assert_eq!(rank_of(&board, "ana", 30), Some(1));
        assert_eq!(rank_of(&board, "bo", 30), Some(2));
        assert_eq!(rank_of(&board, "bo", 31), None);
    }

    #[tokio::test]
    async fn kv_backend_stores_whole_snapshot() {
        let kv = MemoryKv::new();
        let store = LeaderboardStore::new(Arc::new(KvLeaderboardBackend::new(Arc::new(kv.clone()))));
        store.submit("ana", 10).await.unwrap();
        store.submit("bo", 20).await.unwrap();

        let raw = kv.raw(kv::LEADERBOARD_KEY).unwrap();
        assert_eq!(raw[0]["nickname"], "bo");
        assert_eq!(raw[1]["score"], 10);
        assert!(raw[0]["date"].is_string());
    }
}
