//! Business logic powering the admin REST routes: the dashboard guest list,
//! the spreadsheet export rows, and gallery and RSVP maintenance.

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    dao::models::GuestWithRsvpEntity,
    dto::{
        admin::{
            AdminGuestDto, AdminGuestsResponse, AdminPhotosResponse, ExportResponse, ExportRow,
            GuestFilter, GuestStats, GuestStatus,
        },
        photo::PhotoDto,
    },
    error::ServiceError,
    state::SharedState,
};

/// Joined guest list, falling back to directory-only rows when responses
/// cannot be read. The flag tells whether storage answered.
async fn joined_guests(state: &SharedState) -> (Vec<GuestWithRsvpEntity>, bool) {
    match state.rsvps().list_all_joined().await {
        Ok(guests) => (guests, true),
        Err(err) => {
            warn!(error = %err, "rsvp storage unavailable; showing guests without responses");
            let guests = state
                .directory()
                .list()
                .map(GuestWithRsvpEntity::without_response)
                .collect();
            (guests, false)
        }
    }
}

/// Dashboard totals over the whole joined list.
pub fn compute_stats(guests: &[GuestWithRsvpEntity]) -> GuestStats {
    let mut stats = GuestStats {
        total_guests: guests.len(),
        ..GuestStats::default()
    };
    for guest in guests {
        stats.total_allocated += u64::from(guest.seats_allocated);
        stats.total_confirmed += u64::from(guest.seats_confirmed.unwrap_or(0));
        match GuestStatus::of(guest) {
            GuestStatus::Attending => stats.attending += 1,
            GuestStatus::Declined => stats.declined += 1,
            GuestStatus::NoResponse => stats.no_response += 1,
        }
    }
    stats.responded = stats.attending + stats.declined;
    stats
}

/// Filtered dashboard rows with totals computed over every guest.
pub async fn guests(state: &SharedState, filter: GuestFilter) -> AdminGuestsResponse {
    let (joined, storage_available) = joined_guests(state).await;
    let stats = compute_stats(&joined);
    let guests = joined
        .into_iter()
        .map(AdminGuestDto::from)
        .filter(|guest| filter.matches(guest.status))
        .collect();

    AdminGuestsResponse {
        guests,
        stats,
        storage_available,
    }
}

/// Export rows for every guest in directory order.
pub async fn export(state: &SharedState) -> ExportResponse {
    let (joined, storage_available) = joined_guests(state).await;
    ExportResponse {
        file_name: format!("wedding-rsvp-{}.xlsx", OffsetDateTime::now_utc().date()),
        rows: joined.iter().map(ExportRow::from).collect(),
        storage_available,
    }
}

/// Delete every response and report how many existed.
pub async fn clear_rsvps(state: &SharedState) -> Result<usize, ServiceError> {
    let deleted = state.rsvps().clear_all().await?;
    info!(deleted, "cleared rsvps");
    Ok(deleted)
}

pub async fn photos(state: &SharedState) -> Result<AdminPhotosResponse, ServiceError> {
    let photos = state.photos().list_all().await?;
    let count = state.photos().count().await?;
    Ok(AdminPhotosResponse {
        photos: photos.into_iter().map(PhotoDto::from).collect(),
        count,
    })
}

/// Delete a photo, failing with `NotFound` for unknown ids.
pub async fn delete_photo(state: &SharedState, id: &str) -> Result<(), ServiceError> {
    if !state.photos().delete(id).await? {
        return Err(ServiceError::NotFound(format!("photo `{id}`")));
    }
    info!(%id, "photo deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            directory::{directory_of, guest},
            models::RsvpEntity,
            rsvp_store::local::RSVP_FILE,
        },
        state::AppState,
    };

    fn answered(id: &str, allocated: u32, confirmed: u32) -> GuestWithRsvpEntity {
        let guest = guest(id, id, allocated);
        GuestWithRsvpEntity::join(
            &guest,
            Some(RsvpEntity {
                guest_id: id.into(),
                guest_name: id.into(),
                seats_confirmed: confirmed,
                dietary_restrictions: String::new(),
                responded_at: OffsetDateTime::now_utc(),
            }),
        )
    }

    #[test]
    fn stats_count_every_bucket() {
        let guests = vec![
            answered("a", 3, 2),
            answered("b", 2, 0),
            GuestWithRsvpEntity::without_response(&guest("c", "c", 4)),
        ];
        assert_eq!(
            compute_stats(&guests),
            GuestStats {
                total_guests: 3,
                total_allocated: 9,
                total_confirmed: 2,
                responded: 2,
                attending: 1,
                declined: 1,
                no_response: 1,
            }
        );
    }

    #[test]
    fn stats_of_empty_list_are_zero() {
        assert_eq!(compute_stats(&[]), GuestStats::default());
    }

    #[tokio::test]
    async fn unreadable_responses_fall_back_to_directory_rows() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join(RSVP_FILE), "{not json").unwrap();

        let config = AppConfig {
            data_dir,
            uploads_dir: dir.path().join("uploads"),
            ..AppConfig::default()
        };
        let state = AppState::local(
            config,
            directory_of(vec![guest("g1", "Alice Martin", 3), guest("g2", "Bob", 1)]),
        );

        let dashboard = guests(&state, GuestFilter::All).await;
        assert!(!dashboard.storage_available);
        let ids: Vec<_> = dashboard.guests.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
        assert!(dashboard.guests.iter().all(|g| {
            g.responded_at.is_none()
                && g.seats_confirmed.is_none()
                && g.status == GuestStatus::NoResponse
        }));
        assert_eq!(dashboard.stats.no_response, 2);
        assert_eq!(dashboard.stats.total_allocated, 4);

        let export = export(&state).await;
        assert!(!export.storage_available);
        assert_eq!(export.rows.len(), 2);
        assert!(export.rows.iter().all(|row| {
            row.seats_confirmed.is_none()
                && row.response_date.is_empty()
                && row.status == "No Response"
        }));

        assert!(matches!(
            clear_rsvps(&state).await,
            Err(ServiceError::Unavailable(_))
        ));
    }
}
