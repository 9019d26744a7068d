//! Shared application state handed to every route.

/// Word-scramble game engine.
pub mod minigame;
/// Built-in word list.
pub mod words;

use std::sync::Arc;

use crate::{
    config::{AppConfig, BackendSelection, Stores},
    dao::{
        directory::GuestDirectory, kv::KeyValueStore, leaderboard_store::LeaderboardStore,
        photo_store::PhotoStore, rsvp_store::RsvpStore,
    },
};

/// Cheaply clonable handle on the application state.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration and the stores built from it.
///
/// Everything is fixed at start-up; requests only read from it.
pub struct AppState {
    config: AppConfig,
    directory: Arc<GuestDirectory>,
    stores: Stores,
    kv: Option<Arc<dyn KeyValueStore>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        config: AppConfig,
        directory: Arc<GuestDirectory>,
        stores: Stores,
        kv: Option<Arc<dyn KeyValueStore>>,
    ) -> SharedState {
        Arc::new(Self {
            config,
            directory,
            stores,
            kv,
        })
    }

    /// State backed entirely by local files under `config`'s directories.
    pub fn local(config: AppConfig, directory: GuestDirectory) -> SharedState {
        let directory = Arc::new(directory);
        let stores = Stores::build(
            &config,
            BackendSelection::local(),
            directory.clone(),
            None,
            None,
        );
        Self::new(config, directory, stores, None)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn directory(&self) -> &GuestDirectory {
        &self.directory
    }

    pub fn rsvps(&self) -> &RsvpStore {
        &self.stores.rsvps
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.stores.photos
    }

    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.stores.leaderboard
    }

    /// Remote key-value client, when one is configured.
    pub fn kv(&self) -> Option<&Arc<dyn KeyValueStore>> {
        self.kv.as_ref()
    }

    /// Compare a presented admin secret with the configured one.
    pub fn check_admin_secret(&self, provided: &str) -> bool {
        provided == self.config.admin_password
    }
}
