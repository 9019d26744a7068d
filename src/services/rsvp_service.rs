use tracing::info;

use crate::{
    dto::rsvp::{RsvpDto, SubmitRsvpRequest},
    error::ServiceError,
    state::SharedState,
};

/// Stored response of `guest_id`, if any.
pub async fn lookup(state: &SharedState, guest_id: &str) -> Result<Option<RsvpDto>, ServiceError> {
    let rsvp = state.rsvps().get_by_guest_id(guest_id.trim()).await?;
    Ok(rsvp.map(RsvpDto::from))
}

/// Record a guest's answer, replacing any earlier one.
pub async fn submit(state: &SharedState, request: SubmitRsvpRequest) -> Result<RsvpDto, ServiceError> {
    let rsvp = state
        .rsvps()
        .upsert(
            request.guest_id.trim(),
            request.seats_confirmed,
            &request.dietary_restrictions,
        )
        .await?;
    info!(
        guest_id = %rsvp.guest_id,
        seats = rsvp.seats_confirmed,
        "rsvp recorded"
    );
    Ok(rsvp.into())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::directory::{directory_of, guest},
        state::AppState,
    };

    fn local_state(dir: &TempDir) -> SharedState {
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            uploads_dir: dir.path().join("uploads"),
            ..AppConfig::default()
        };
        AppState::local(config, directory_of(vec![guest("g1", "Alice Martin", 3)]))
    }

    fn request(guest_id: &str, seats: i64) -> SubmitRsvpRequest {
        SubmitRsvpRequest {
            guest_id: guest_id.into(),
            seats_confirmed: seats,
            dietary_restrictions: "vegetarian".into(),
        }
    }

    #[tokio::test]
    async fn submit_then_lookup() {
        let dir = TempDir::new().unwrap();
        let state = local_state(&dir);

        assert!(lookup(&state, "g1").await.unwrap().is_none());

        let saved = submit(&state, request(" g1 ", 2)).await.unwrap();
        assert_eq!(saved.guest_name, "Alice Martin");
        assert_eq!(saved.seats_confirmed, 2);

        let found = lookup(&state, "g1").await.unwrap().unwrap();
        assert_eq!(found.dietary_restrictions, "vegetarian");
    }

    #[tokio::test]
    async fn resubmitting_replaces_the_answer() {
        let dir = TempDir::new().unwrap();
        let state = local_state(&dir);

        submit(&state, request("g1", 3)).await.unwrap();
        submit(&state, request("g1", 0)).await.unwrap();

        let found = lookup(&state, "g1").await.unwrap().unwrap();
        assert_eq!(found.seats_confirmed, 0);
        assert_eq!(state.rsvps().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_guest_and_seat_overflow() {
        let dir = TempDir::new().unwrap();
        let state = local_state(&dir);

        assert!(matches!(
            submit(&state, request("nobody", 1)).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            submit(&state, request("g1", 4)).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            submit(&state, request("g1", -1)).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(lookup(&state, "g1").await.unwrap().is_none());
    }
}
