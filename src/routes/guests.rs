use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::guest::{EventDetailsDto, GuestResponse, GuestSearchQuery, GuestSearchResponse},
    error::AppError,
    services::guest_service,
    state::SharedState,
};

/// Public guest lookup used by the RSVP page.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/guests", get(search_guests))
        .route("/guests/{id}", get(get_guest))
        .route("/event", get(event_details))
}

/// Search invitees by a fragment of their name.
#[utoipa::path(
    get,
    path = "/guests",
    tag = "guests",
    params(GuestSearchQuery),
    responses((status = 200, description = "Matching guests; empty for a blank query", body = GuestSearchResponse))
)]
pub async fn search_guests(
    State(state): State<SharedState>,
    Query(query): Query<GuestSearchQuery>,
) -> Json<GuestSearchResponse> {
    let guests = guest_service::search(&state, query.q.as_deref());
    Json(GuestSearchResponse { guests })
}

#[utoipa::path(
    get,
    path = "/guests/{id}",
    tag = "guests",
    params(("id" = String, Path, description = "Guest identifier")),
    responses(
        (status = 200, description = "Guest", body = GuestResponse),
        (status = 404, description = "Unknown guest")
    )
)]
pub async fn get_guest(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GuestResponse>, AppError> {
    let guest = guest_service::get_by_id(&state, &id)?;
    Ok(Json(GuestResponse { guest }))
}

#[utoipa::path(
    get,
    path = "/event",
    tag = "guests",
    responses((status = 200, description = "Ceremony and reception details", body = EventDetailsDto))
)]
pub async fn event_details(State(state): State<SharedState>) -> Json<EventDetailsDto> {
    Json(guest_service::event_details(&state))
}
