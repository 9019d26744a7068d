use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::dao::models::{EventDetailsEntity, GuestEntity};

/// Public projection of an invitee.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    pub id: String,
    pub name: String,
    pub seats_allocated: u32,
}

impl From<&GuestEntity> for GuestSummary {
    fn from(guest: &GuestEntity) -> Self {
        Self {
            id: guest.id.clone(),
            name: guest.name.clone(),
            seats_allocated: guest.seats_allocated,
        }
    }
}

/// Query string of the guest search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GuestSearchQuery {
    /// Case-insensitive fragment of a guest name.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuestSearchResponse {
    pub guests: Vec<GuestSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuestResponse {
    pub guest: GuestSummary,
}

/// Ceremony and reception details.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsDto {
    pub couple_name: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reception_venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reception_address: Option<String>,
    pub rsvp_deadline: String,
}

impl From<&EventDetailsEntity> for EventDetailsDto {
    fn from(details: &EventDetailsEntity) -> Self {
        Self {
            couple_name: details.couple_name.clone(),
            date: details.date.clone(),
            time: details.time.clone(),
            venue: details.venue.clone(),
            address: details.address.clone(),
            reception_venue: details.reception_venue.clone(),
            reception_address: details.reception_address.clone(),
            rsvp_deadline: details.rsvp_deadline.clone(),
        }
    }
}
