use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Invitee loaded from the static guest dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestEntity {
    /// Stable identifier referenced by RSVP records.
    pub id: String,
    /// Display name used for search and denormalized into RSVPs.
    pub name: String,
    /// Number of seats reserved for this invitation (at least one).
    pub seats_allocated: u32,
}

/// Static description of the event shipped with the guest dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsEntity {
    pub couple_name: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reception_venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reception_address: Option<String>,
    pub rsvp_deadline: String,
}

/// On-disk layout of the guest dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDataEntity {
    pub guests: Vec<GuestEntity>,
    #[serde(default)]
    pub event_details: EventDetailsEntity,
}

/// A guest's attendance response. At most one exists per guest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpEntity {
    /// Identifier of the guest this response belongs to.
    pub guest_id: String,
    /// Guest name captured when the response was written.
    pub guest_name: String,
    /// Seats confirmed, between zero and the guest's allocation.
    pub seats_confirmed: u32,
    /// Free-form dietary notes (may be empty).
    pub dietary_restrictions: String,
    /// Time of the last submission.
    #[serde(with = "time::serde::rfc3339")]
    pub responded_at: OffsetDateTime,
}

/// Guest joined with its RSVP, if any. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestWithRsvpEntity {
    pub id: String,
    pub name: String,
    pub seats_allocated: u32,
    /// `None` until the guest responds.
    pub seats_confirmed: Option<u32>,
    pub dietary_restrictions: String,
    /// `None` until the guest responds.
    #[serde(with = "time::serde::rfc3339::option")]
    pub responded_at: Option<OffsetDateTime>,
}

impl GuestWithRsvpEntity {
    /// Merge a guest with its optional response.
    pub fn join(guest: &GuestEntity, rsvp: Option<RsvpEntity>) -> Self {
        match rsvp {
            Some(rsvp) => Self {
                id: guest.id.clone(),
                name: guest.name.clone(),
                seats_allocated: guest.seats_allocated,
                seats_confirmed: Some(rsvp.seats_confirmed),
                dietary_restrictions: rsvp.dietary_restrictions,
                responded_at: Some(rsvp.responded_at),
            },
            None => Self::without_response(guest),
        }
    }

    /// Project a guest with every RSVP field empty.
    pub fn without_response(guest: &GuestEntity) -> Self {
        Self {
            id: guest.id.clone(),
            name: guest.name.clone(),
            seats_allocated: guest.seats_allocated,
            seats_confirmed: None,
            dietary_restrictions: String::new(),
            responded_at: None,
        }
    }
}

/// Metadata describing an uploaded photo and where its binary lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEntity {
    /// Generated identifier (`<unix millis>-<random suffix>`).
    pub id: String,
    pub uploader_name: String,
    /// Original file name as provided by the uploader.
    pub file_name: String,
    /// Reference to the binary: a local `/uploads/...` path or an absolute URL.
    pub blob_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
    /// Size of the binary in bytes.
    pub file_size: u64,
    pub mime_type: String,
}

/// A score kept on the minigame leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryEntity {
    pub nickname: String,
    pub score: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}
