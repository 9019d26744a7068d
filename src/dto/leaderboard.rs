use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

use crate::{dao::models::LeaderboardEntryEntity, dto::validation::validate_not_blank};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    pub nickname: String,
    pub score: i64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub date: OffsetDateTime,
}

impl From<LeaderboardEntryEntity> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntryEntity) -> Self {
        Self {
            nickname: entry.nickname,
            score: entry.score,
            date: entry.date,
        }
    }
}

/// Current board. `degraded` is set when storage could not be read and the
/// list is empty for that reason.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntryDto>,
    pub degraded: bool,
}

/// Score submission. Nicknames longer than 20 characters are cut.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitScoreRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub nickname: String,
    pub score: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub success: bool,
    pub leaderboard: Vec<LeaderboardEntryDto>,
    /// 1-based position of the submitted score, absent when it did not make the board.
    pub rank: Option<usize>,
}
