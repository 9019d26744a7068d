/// Admin dashboard, export and maintenance payloads.
pub mod admin;
/// Guest lookup and event details payloads.
pub mod guest;
/// Health check payloads.
pub mod health;
/// Minigame leaderboard payloads.
pub mod leaderboard;
/// Gallery payloads.
pub mod photo;
/// RSVP payloads.
pub mod rsvp;
/// Shared field validators.
pub mod validation;
