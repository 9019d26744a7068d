//! End-to-end flows over the local file backends.

use std::fs;

use tempfile::TempDir;

use wedding_rsvp_back::{
    config::AppConfig,
    dto::{
        admin::{GuestFilter, GuestStatus},
        photo::{UploadBatch, UploadedFile},
        rsvp::SubmitRsvpRequest,
    },
    error::ServiceError,
    services::{admin_service, guest_service, photo_service, rsvp_service},
    state::{AppState, SharedState},
};

const DATASET: &str = r#"{
  "guests": [
    { "id": "g1", "name": "Alice Martin", "seatsAllocated": 3 },
    { "id": "g2", "name": "Bob Alison", "seatsAllocated": 1 },
    { "id": "g3", "name": "Chloe Durand", "seatsAllocated": 2 }
  ],
  "eventDetails": {
    "coupleName": "Sam & Jordan",
    "date": "2025-06-14",
    "time": "16:00",
    "venue": "Willow Creek Chapel",
    "address": "12 Orchard Lane",
    "rsvpDeadline": "2025-05-01"
  }
}"#;

fn boot(dir: &TempDir) -> SharedState {
    let guests_path = dir.path().join("guests.json");
    fs::write(&guests_path, DATASET).unwrap();

    let config = AppConfig {
        guests_path,
        data_dir: dir.path().join("data"),
        uploads_dir: dir.path().join("uploads"),
        ..AppConfig::default()
    };
    let directory = config.load_directory().unwrap();
    AppState::local(config, directory)
}

fn rsvp(guest_id: &str, seats: i64, dietary: &str) -> SubmitRsvpRequest {
    SubmitRsvpRequest {
        guest_id: guest_id.into(),
        seats_confirmed: seats,
        dietary_restrictions: dietary.into(),
    }
}

fn png(name: &str) -> UploadedFile {
    UploadedFile {
        file_name: name.into(),
        mime_type: "image/png".into(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

#[tokio::test]
async fn guest_finds_themselves_and_responds() {
    let dir = TempDir::new().unwrap();
    let state = boot(&dir);

    let matches = guest_service::search(&state, Some("ali"));
    let ids: Vec<_> = matches.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);
    assert!(guest_service::search(&state, Some("   ")).is_empty());
    assert_eq!(guest_service::event_details(&state).couple_name, "Sam & Jordan");

    rsvp_service::submit(&state, rsvp("g1", 2, "vegan")).await.unwrap();
    let err = rsvp_service::submit(&state, rsvp("g1", 5, "")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(ref msg) if msg.contains("0 and 3")));

    let stored = rsvp_service::lookup(&state, "g1").await.unwrap().unwrap();
    assert_eq!(stored.seats_confirmed, 2);
    assert_eq!(stored.dietary_restrictions, "vegan");

    let on_disk = fs::read_to_string(dir.path().join("data/rsvps.json")).unwrap();
    assert!(on_disk.contains("\"guestName\": \"Alice Martin\""));
}

#[tokio::test]
async fn admin_dashboard_tracks_responses_until_cleared() {
    let dir = TempDir::new().unwrap();
    let state = boot(&dir);

    rsvp_service::submit(&state, rsvp("g1", 2, "")).await.unwrap();
    rsvp_service::submit(&state, rsvp("g2", 0, "")).await.unwrap();

    let dashboard = admin_service::guests(&state, GuestFilter::All).await;
    assert!(dashboard.storage_available);
    assert_eq!(dashboard.stats.total_guests, 3);
    assert_eq!(dashboard.stats.total_allocated, 6);
    assert_eq!(dashboard.stats.total_confirmed, 2);
    assert_eq!(dashboard.stats.attending, 1);
    assert_eq!(dashboard.stats.declined, 1);
    assert_eq!(dashboard.stats.no_response, 1);

    let pending = admin_service::guests(&state, GuestFilter::NoResponse).await;
    assert_eq!(pending.guests.len(), 1);
    assert_eq!(pending.guests[0].status, GuestStatus::NoResponse);

    let export = admin_service::export(&state).await;
    let statuses: Vec<_> = export.rows.iter().map(|row| row.status.as_str()).collect();
    assert_eq!(statuses, vec!["Attending", "Declined", "No Response"]);

    assert_eq!(admin_service::clear_rsvps(&state).await.unwrap(), 2);
    let cleared = admin_service::guests(&state, GuestFilter::All).await;
    assert!(cleared.guests.iter().all(|g| g.responded_at.is_none()));
}

#[tokio::test]
async fn photos_are_listed_newest_first_and_deleted_with_their_file() {
    let dir = TempDir::new().unwrap();
    let state = boot(&dir);

    photo_service::upload(
        &state,
        UploadBatch {
            uploader_name: "  Alice ".into(),
            files: vec![png("first.png")],
        },
    )
    .await
    .unwrap();
    let second = photo_service::upload(
        &state,
        UploadBatch {
            uploader_name: "Bob".into(),
            files: vec![png("my photo (2).png")],
        },
    )
    .await
    .unwrap()
    .remove(0);

    assert_eq!(second.file_name, "my photo (2).png");
    assert!(second.blob_url.starts_with("/uploads/"));
    assert!(second.blob_url.ends_with("-my_photo__2_.png"));

    let listed = photo_service::list(&state).await.unwrap();
    let uploaders: Vec<_> = listed.iter().map(|p| p.uploader_name.as_str()).collect();
    assert_eq!(uploaders, vec!["Bob", "Alice"]);

    let stored_name = second.blob_url.trim_start_matches("/uploads/");
    let blob_path = dir.path().join("uploads").join(stored_name);
    assert!(blob_path.exists());

    admin_service::delete_photo(&state, &second.id).await.unwrap();
    assert!(!blob_path.exists());
    assert_eq!(admin_service::photos(&state).await.unwrap().count, 1);
    assert!(matches!(
        admin_service::delete_photo(&state, &second.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn invalid_batch_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let state = boot(&dir);

    let mut pdf = png("notes.pdf");
    pdf.mime_type = "application/pdf".into();
    let err = photo_service::upload(
        &state,
        UploadBatch {
            uploader_name: "Alice".into(),
            files: vec![png("ok.png"), pdf],
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(ref msg) if msg.starts_with("notes.pdf")));
    assert!(photo_service::list(&state).await.unwrap().is_empty());
    assert!(!dir.path().join("uploads").exists());
}
