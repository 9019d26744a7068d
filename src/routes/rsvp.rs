use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::rsvp::{RsvpLookupResponse, RsvpQuery, SubmitRsvpRequest, SubmitRsvpResponse},
    error::AppError,
    services::rsvp_service,
    state::SharedState,
};

/// RSVP lookup and submission routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/rsvp", get(get_rsvp).post(submit_rsvp))
}

/// Fetch the response a guest already gave.
#[utoipa::path(
    get,
    path = "/rsvp",
    tag = "rsvp",
    params(RsvpQuery),
    responses(
        (status = 200, description = "Stored response, or null", body = RsvpLookupResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn get_rsvp(
    State(state): State<SharedState>,
    Valid(Query(query)): Valid<Query<RsvpQuery>>,
) -> Result<Json<RsvpLookupResponse>, AppError> {
    let rsvp = rsvp_service::lookup(&state, &query.guest_id).await?;
    Ok(Json(RsvpLookupResponse { rsvp }))
}

/// Submit or replace a guest's response.
#[utoipa::path(
    post,
    path = "/rsvp",
    tag = "rsvp",
    request_body = SubmitRsvpRequest,
    responses(
        (status = 200, description = "Response recorded", body = SubmitRsvpResponse),
        (status = 400, description = "Seats out of range"),
        (status = 404, description = "Unknown guest"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn submit_rsvp(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SubmitRsvpRequest>>,
) -> Result<Json<SubmitRsvpResponse>, AppError> {
    let rsvp = rsvp_service::submit(&state, payload).await?;
    Ok(Json(SubmitRsvpResponse {
        success: true,
        rsvp,
    }))
}
