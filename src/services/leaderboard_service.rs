use tracing::{info, warn};

use crate::{
    dao::leaderboard_store::rank_of,
    dto::leaderboard::{LeaderboardResponse, SubmitScoreRequest, SubmitScoreResponse},
    error::ServiceError,
    state::SharedState,
};

/// Current board. An unreadable store yields an empty board flagged as degraded.
pub async fn get_top(state: &SharedState) -> LeaderboardResponse {
    match state.leaderboard().get_top().await {
        Ok(entries) => LeaderboardResponse {
            leaderboard: entries.into_iter().map(Into::into).collect(),
            degraded: false,
        },
        Err(err) => {
            warn!(error = %err, "leaderboard unavailable; serving an empty board");
            LeaderboardResponse {
                leaderboard: Vec::new(),
                degraded: true,
            }
        }
    }
}

/// Submit a trimmed nickname and score, returning the new board and the rank reached.
pub async fn submit(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    let nickname = request.nickname.trim();
    let entries = state.leaderboard().submit(nickname, request.score).await?;
    let rank = rank_of(&entries, nickname, request.score);
    info!(nickname, score = request.score, ?rank, "score submitted");

    Ok(SubmitScoreResponse {
        success: true,
        leaderboard: entries.into_iter().map(Into::into).collect(),
        rank,
    })
}
