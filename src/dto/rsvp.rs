use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{dao::models::RsvpEntity, dto::validation::validate_not_blank};

/// A guest's stored response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpDto {
    pub guest_id: String,
    pub guest_name: String,
    pub seats_confirmed: u32,
    pub dietary_restrictions: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub responded_at: OffsetDateTime,
}

impl From<RsvpEntity> for RsvpDto {
    fn from(rsvp: RsvpEntity) -> Self {
        Self {
            guest_id: rsvp.guest_id,
            guest_name: rsvp.guest_name,
            seats_confirmed: rsvp.seats_confirmed,
            dietary_restrictions: rsvp.dietary_restrictions,
            responded_at: rsvp.responded_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RsvpQuery {
    #[validate(custom(function = "validate_not_blank"))]
    pub guest_id: String,
}

/// Lookup result; `rsvp` is `null` when the guest has not answered yet.
#[derive(Debug, Serialize, ToSchema)]
pub struct RsvpLookupResponse {
    pub rsvp: Option<RsvpDto>,
}

/// RSVP submission. The seat range is checked against the guest's allocation.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRsvpRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub guest_id: String,
    pub seats_confirmed: i64,
    #[serde(default)]
    pub dietary_restrictions: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitRsvpResponse {
    pub success: bool,
    pub rsvp: RsvpDto,
}
