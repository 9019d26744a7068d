use crate::{
    dto::guest::{EventDetailsDto, GuestSummary},
    error::ServiceError,
    state::SharedState,
};

/// Guests whose name contains `query`. A missing or blank query finds nobody.
pub fn search(state: &SharedState, query: Option<&str>) -> Vec<GuestSummary> {
    state
        .directory()
        .search(query.unwrap_or_default())
        .into_iter()
        .map(GuestSummary::from)
        .collect()
}

pub fn get_by_id(state: &SharedState, id: &str) -> Result<GuestSummary, ServiceError> {
    state
        .directory()
        .get_by_id(id)
        .map(GuestSummary::from)
        .ok_or_else(|| ServiceError::NotFound(format!("guest `{id}`")))
}

pub fn event_details(state: &SharedState) -> EventDetailsDto {
    EventDetailsDto::from(state.directory().event_details())
}
