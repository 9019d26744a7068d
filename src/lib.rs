//! Library crate for wedding-rsvp-back, exposing modules for binaries and integration tests.

/// Environment configuration and storage wiring.
pub mod config;
/// Storage backends and stores.
pub mod dao;
/// Wire types of the REST API.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// axum routers.
pub mod routes;
/// Operations behind the routes.
pub mod services;
/// Shared state and the minigame engine.
pub mod state;
