/// Admin dashboard data, export and maintenance operations.
pub mod admin_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Guest lookup and event details.
pub mod guest_service;
/// Health check service.
pub mod health_service;
/// Minigame score board.
pub mod leaderboard_service;
/// Photo gallery uploads and listing.
pub mod photo_service;
/// RSVP lookup and submission.
pub mod rsvp_service;
