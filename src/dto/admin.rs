//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};

use crate::{dao::models::GuestWithRsvpEntity, dto::photo::PhotoDto};

/// Response state of a guest as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GuestStatus {
    /// Responded with at least one seat.
    Attending,
    /// Responded with zero seats.
    Declined,
    /// Has not responded yet.
    NoResponse,
}

impl GuestStatus {
    /// Responded with at least one seat, responded with zero, or not responded.
    pub fn of(guest: &GuestWithRsvpEntity) -> Self {
        match (guest.responded_at, guest.seats_confirmed) {
            (None, _) => GuestStatus::NoResponse,
            (Some(_), Some(seats)) if seats > 0 => GuestStatus::Attending,
            (Some(_), _) => GuestStatus::Declined,
        }
    }

    /// Label used in exports.
    pub fn label(self) -> &'static str {
        match self {
            GuestStatus::Attending => "Attending",
            GuestStatus::Declined => "Declined",
            GuestStatus::NoResponse => "No Response",
        }
    }
}

/// Dashboard filter over the joined guest list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GuestFilter {
    #[default]
    All,
    Attending,
    Declined,
    NoResponse,
}

impl GuestFilter {
    /// Whether a guest with `status` passes this filter.
    pub fn matches(self, status: GuestStatus) -> bool {
        match self {
            GuestFilter::All => true,
            GuestFilter::Attending => status == GuestStatus::Attending,
            GuestFilter::Declined => status == GuestStatus::Declined,
            GuestFilter::NoResponse => status == GuestStatus::NoResponse,
        }
    }
}

/// Query string of `GET /admin/guests`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminGuestsQuery {
    /// `all` (default), `attending`, `declined` or `no-response`.
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub filter: Option<GuestFilter>,
}

/// Guest merged with its RSVP; RSVP fields are `null` until the guest answers.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminGuestDto {
    pub id: String,
    pub name: String,
    pub seats_allocated: u32,
    pub seats_confirmed: Option<u32>,
    pub dietary_restrictions: String,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub responded_at: Option<OffsetDateTime>,
    pub status: GuestStatus,
}

impl From<GuestWithRsvpEntity> for AdminGuestDto {
    fn from(guest: GuestWithRsvpEntity) -> Self {
        let status = GuestStatus::of(&guest);
        Self {
            id: guest.id,
            name: guest.name,
            seats_allocated: guest.seats_allocated,
            seats_confirmed: guest.seats_confirmed,
            dietary_restrictions: guest.dietary_restrictions,
            responded_at: guest.responded_at,
            status,
        }
    }
}

/// Totals computed over the whole guest list, regardless of the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestStats {
    pub total_guests: usize,
    pub total_allocated: u64,
    pub total_confirmed: u64,
    pub responded: usize,
    pub attending: usize,
    pub declined: usize,
    pub no_response: usize,
}

/// Dashboard payload: filtered guests and totals over all guests.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminGuestsResponse {
    pub guests: Vec<AdminGuestDto>,
    pub stats: GuestStats,
    /// `false` when responses could not be read and only the directory is shown.
    pub storage_available: bool,
}

/// One spreadsheet row of the guest export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Seats Allocated")]
    pub seats_allocated: u32,
    #[serde(rename = "Seats Confirmed")]
    pub seats_confirmed: Option<u32>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Dietary Restrictions")]
    pub dietary_restrictions: String,
    /// Calendar date of the response (`YYYY-MM-DD`), empty when none.
    #[serde(rename = "Response Date")]
    pub response_date: String,
}

impl From<&GuestWithRsvpEntity> for ExportRow {
    fn from(guest: &GuestWithRsvpEntity) -> Self {
        Self {
            name: guest.name.clone(),
            seats_allocated: guest.seats_allocated,
            seats_confirmed: guest.seats_confirmed,
            status: GuestStatus::of(guest).label().to_owned(),
            dietary_restrictions: guest.dietary_restrictions.clone(),
            response_date: guest
                .responded_at
                .map(|at| at.date().to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    /// Suggested spreadsheet name, `wedding-rsvp-<date>.xlsx`.
    pub file_name: String,
    pub rows: Vec<ExportRow>,
    pub storage_available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearRsvpsResponse {
    pub success: bool,
    pub deleted: usize,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPhotosResponse {
    pub photos: Vec<PhotoDto>,
    pub count: usize,
}

/// Generic action acknowledgement used by admin endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn joined(seats: Option<u32>, responded: bool) -> GuestWithRsvpEntity {
        GuestWithRsvpEntity {
            id: "g1".into(),
            name: "Alice".into(),
            seats_allocated: 3,
            seats_confirmed: seats,
            dietary_restrictions: String::new(),
            responded_at: responded.then(|| datetime!(2026-05-01 12:30 UTC)),
        }
    }

    #[test]
    fn status_follows_response_and_seats() {
        assert_eq!(GuestStatus::of(&joined(None, false)), GuestStatus::NoResponse);
        assert_eq!(GuestStatus::of(&joined(Some(2), true)), GuestStatus::Attending);
        assert_eq!(GuestStatus::of(&joined(Some(0), true)), GuestStatus::Declined);
    }

    #[test]
    fn export_row_uses_spreadsheet_headers() {
        let row = ExportRow::from(&joined(Some(2), true));
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Name"], "Alice");
        assert_eq!(value["Seats Allocated"], 3);
        assert_eq!(value["Seats Confirmed"], 2);
        assert_eq!(value["Status"], "Attending");
        assert_eq!(value["Response Date"], "2026-05-01");

        let pending = serde_json::to_value(ExportRow::from(&joined(None, false))).unwrap();
        assert!(pending["Seats Confirmed"].is_null());
        assert_eq!(pending["Status"], "No Response");
        assert_eq!(pending["Response Date"], "");
    }

    #[test]
    fn filter_parses_kebab_case() {
        let filter: GuestFilter = serde_json::from_str("\"no-response\"").unwrap();
        assert_eq!(filter, GuestFilter::NoResponse);
        assert!(GuestFilter::All.matches(GuestStatus::Declined));
        assert!(!GuestFilter::Attending.matches(GuestStatus::Declined));
    }
}
