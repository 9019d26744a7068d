use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the wedding RSVP backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::guests::search_guests,
        crate::routes::guests::get_guest,
        crate::routes::guests::event_details,
        crate::routes::rsvp::get_rsvp,
        crate::routes::rsvp::submit_rsvp,
        crate::routes::photos::list_photos,
        crate::routes::photos::upload_photos,
        crate::routes::photos::register_external_photo,
        crate::routes::leaderboard::get_leaderboard,
        crate::routes::leaderboard::submit_score,
        crate::routes::admin::list_guests,
        crate::routes::admin::export_guests,
        crate::routes::admin::clear_rsvps,
        crate::routes::admin::list_photos,
        crate::routes::admin::delete_photo,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::BackendsSummary,
            crate::dto::guest::GuestSummary,
            crate::dto::guest::GuestSearchResponse,
            crate::dto::guest::GuestResponse,
            crate::dto::guest::EventDetailsDto,
            crate::dto::rsvp::RsvpDto,
            crate::dto::rsvp::RsvpLookupResponse,
            crate::dto::rsvp::SubmitRsvpRequest,
            crate::dto::rsvp::SubmitRsvpResponse,
            crate::dto::photo::PhotoDto,
            crate::dto::photo::PhotoListResponse,
            crate::dto::photo::PhotoUploadForm,
            crate::dto::photo::UploadPhotosResponse,
            crate::dto::photo::ExternalPhotoRequest,
            crate::dto::photo::ExternalPhotoResponse,
            crate::dto::leaderboard::LeaderboardEntryDto,
            crate::dto::leaderboard::LeaderboardResponse,
            crate::dto::leaderboard::SubmitScoreRequest,
            crate::dto::leaderboard::SubmitScoreResponse,
            crate::dto::admin::AdminGuestDto,
            crate::dto::admin::AdminGuestsResponse,
            crate::dto::admin::GuestStats,
            crate::dto::admin::GuestStatus,
            crate::dto::admin::GuestFilter,
            crate::dto::admin::ExportRow,
            crate::dto::admin::ExportResponse,
            crate::dto::admin::ClearRsvpsResponse,
            crate::dto::admin::AdminPhotosResponse,
            crate::dto::admin::ActionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "guests", description = "Guest lookup and event details"),
        (name = "rsvp", description = "RSVP lookup and submission"),
        (name = "photos", description = "Photo gallery"),
        (name = "minigame", description = "Word-scramble leaderboard"),
        (name = "admin", description = "Dashboard, export and maintenance (admin secret required)"),
    )
)]
pub struct ApiDoc;
