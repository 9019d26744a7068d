use axum::{Json, Router, extract::State, routing::get};
use axum_valid::Valid;

use crate::{
    dto::leaderboard::{LeaderboardResponse, SubmitScoreRequest, SubmitScoreResponse},
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

/// Minigame leaderboard routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/leaderboard", get(get_leaderboard).post(submit_score))
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "minigame",
    responses((status = 200, description = "Top scores, best first", body = LeaderboardResponse))
)]
/// Top scores; empty and flagged when storage cannot be read.
pub async fn get_leaderboard(State(state): State<SharedState>) -> Json<LeaderboardResponse> {
    Json(leaderboard_service::get_top(&state).await)
}

#[utoipa::path(
    post,
    path = "/leaderboard",
    tag = "minigame",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Updated board and the rank reached", body = SubmitScoreResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Record a finished game and report its rank.
pub async fn submit_score(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SubmitScoreRequest>>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    Ok(Json(leaderboard_service::submit(&state, payload).await?))
}
