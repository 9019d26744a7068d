use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

/// Admin routes behind the shared secret.
pub mod admin;
/// Swagger UI and OpenAPI document.
pub mod docs;
/// Guest lookup and event details.
pub mod guests;
/// Health check.
pub mod health;
/// Minigame leaderboard.
pub mod leaderboard;
/// Photo gallery.
pub mod photos;
/// RSVP lookup and submission.
pub mod rsvp;

/// Compose all route trees, wiring in shared state, static uploads and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(guests::router())
        .merge(rsvp::router())
        .merge(photos::router())
        .merge(leaderboard::router())
        .merge(admin::router(state.clone()));

    let uploads = ServeDir::new(&state.config().uploads_dir);

    api_router
        .merge(docs::router())
        .nest_service("/uploads", uploads)
        .with_state(state)
}
