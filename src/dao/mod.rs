/// Photo binary storage (local uploads directory or object store).
pub mod blob_store;
/// Read-only guest list and event details.
pub mod directory;
/// Remote key-value primitives.
pub mod kv;
/// Top-10 minigame scores.
pub mod leaderboard_store;
/// Whole-document JSON files used by the local backends.
pub mod local_json;
/// Persisted record definitions.
pub mod models;
/// Photo metadata and its pairing with blobs.
pub mod photo_store;
/// Guest responses keyed by guest id.
pub mod rsvp_store;
/// Backend-agnostic storage errors.
pub mod storage;
