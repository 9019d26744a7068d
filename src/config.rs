//! Application-level configuration loading and storage backend selection.

use std::{env, path::PathBuf, sync::Arc};

use tracing::{info, warn};

use crate::dao::{
    blob_store::{BlobBackend, LocalBlobBackend},
    directory::{DirectoryError, GuestDirectory},
    kv::KeyValueStore,
    leaderboard_store::{
        KvLeaderboardBackend, LeaderboardBackend, LeaderboardStore, LocalLeaderboardBackend,
        local::LEADERBOARD_FILE,
    },
    photo_store::{
        KvPhotoIndex, LocalPhotoIndex, PhotoIndexBackend, PhotoStore, local::PHOTOS_FILE,
    },
    rsvp_store::{KvRsvpBackend, LocalRsvpBackend, RsvpBackend, RsvpStore, local::RSVP_FILE},
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_GUESTS_PATH: &str = "data/guests.json";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_UPLOADS_DIR: &str = "public/uploads";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening port (`PORT`, then `SERVER_PORT`).
    pub port: u16,
    /// Shared secret expected in the `X-Admin-Token` header.
    pub admin_password: String,
    /// Guest dataset file.
    pub guests_path: PathBuf,
    /// Directory of the local JSON documents.
    pub data_dir: PathBuf,
    /// Directory of locally stored photo binaries, served under `/uploads`.
    pub uploads_dir: PathBuf,
    /// Key-value REST endpoint.
    pub kv_url: Option<String>,
    /// Bearer token of the key-value endpoint.
    pub kv_token: Option<String>,
    /// Read-write token of the object store.
    pub blob_token: Option<String>,
    /// Object store endpoint override.
    pub blob_api_url: Option<String>,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = var("PORT")
            .or_else(|| var("SERVER_PORT"))
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let admin_password = var("ADMIN_PASSWORD").unwrap_or_else(|| {
            warn!("ADMIN_PASSWORD not set; using the built-in default");
            DEFAULT_ADMIN_PASSWORD.to_owned()
        });

        Self {
            port,
            admin_password,
            guests_path: var("GUESTS_PATH")
                .unwrap_or_else(|| DEFAULT_GUESTS_PATH.to_owned())
                .into(),
            data_dir: var("DATA_DIR")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned())
                .into(),
            uploads_dir: var("UPLOADS_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOADS_DIR.to_owned())
                .into(),
            kv_url: var("KV_REST_API_URL"),
            kv_token: var("KV_REST_API_TOKEN"),
            blob_token: var("BLOB_READ_WRITE_TOKEN"),
            blob_api_url: var("BLOB_API_URL"),
        }
    }

    /// Which domains are served by the remote stores.
    pub fn backend_selection(&self) -> BackendSelection {
        let kv = self.kv_url.is_some() && self.kv_token.is_some();
        let blob = self.blob_token.is_some();

        if cfg!(not(feature = "remote-store")) && (kv || blob) {
            warn!("remote storage configured but the `remote-store` feature is disabled; using local files");
            return BackendSelection::local();
        }

        BackendSelection {
            rsvp: kv,
            photo_metadata: kv,
            leaderboard: kv,
            photo_blob: blob,
        }
    }

    /// Load the guest dataset from [`AppConfig::guests_path`].
    pub fn load_directory(&self) -> Result<GuestDirectory, DirectoryError> {
        GuestDirectory::load(&self.guests_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_owned(),
            guests_path: DEFAULT_GUESTS_PATH.into(),
            data_dir: DEFAULT_DATA_DIR.into(),
            uploads_dir: DEFAULT_UPLOADS_DIR.into(),
            kv_url: None,
            kv_token: None,
            blob_token: None,
            blob_api_url: None,
        }
    }
}

/// Remote-or-local decision per data domain, computed once at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendSelection {
    /// RSVP records on the key-value service.
    pub rsvp: bool,
    /// Photo records on the key-value service.
    pub photo_metadata: bool,
    /// Photo bytes on the object store.
    pub photo_blob: bool,
    /// Leaderboard on the key-value service.
    pub leaderboard: bool,
}

impl BackendSelection {
    /// Everything on local files.
    pub fn local() -> Self {
        Self::default()
    }

    #[cfg_attr(not(feature = "remote-store"), allow(dead_code))]
    fn needs_kv(&self) -> bool {
        self.rsvp || self.photo_metadata || self.leaderboard
    }
}

/// Failure to construct the remote clients.
#[derive(Debug, thiserror::Error)]
pub enum BackendInitError {
    /// The key-value client could not be built.
    #[cfg(feature = "remote-store")]
    #[error(transparent)]
    Kv(#[from] crate::dao::kv::rest::KvError),
    /// The object-store client could not be built.
    #[cfg(feature = "remote-store")]
    #[error(transparent)]
    Blob(#[from] crate::dao::blob_store::BlobError),
}

/// The stores wired to the backends chosen by a [`BackendSelection`].
#[derive(Clone)]
pub struct Stores {
    /// Responses keyed by guest id.
    pub rsvps: RsvpStore,
    /// Photo metadata and bytes.
    pub photos: PhotoStore,
    /// Top scores.
    pub leaderboard: LeaderboardStore,
}

impl Stores {
    /// Build every store on the selected backends.
    ///
    /// `kv` is used for the domains selected as remote; when absent those
    /// domains fall back to local files.
    pub fn build(
        config: &AppConfig,
        selection: BackendSelection,
        directory: Arc<GuestDirectory>,
        kv: Option<Arc<dyn KeyValueStore>>,
        remote_blobs: Option<Arc<dyn BlobBackend>>,
    ) -> Self {
        let data_dir = &config.data_dir;
        let remote_kv = |selected: bool| kv.clone().filter(|_| selected);

        let rsvp_backend: Arc<dyn RsvpBackend> = match remote_kv(selection.rsvp) {
            Some(kv) => Arc::new(KvRsvpBackend::new(kv)),
            None => Arc::new(LocalRsvpBackend::new(data_dir.join(RSVP_FILE))),
        };
        let photo_index: Arc<dyn PhotoIndexBackend> = match remote_kv(selection.photo_metadata) {
            Some(kv) => Arc::new(KvPhotoIndex::new(kv)),
            None => Arc::new(LocalPhotoIndex::new(data_dir.join(PHOTOS_FILE))),
        };
        let leaderboard_backend: Arc<dyn LeaderboardBackend> =
            match remote_kv(selection.leaderboard) {
                Some(kv) => Arc::new(KvLeaderboardBackend::new(kv)),
                None => Arc::new(LocalLeaderboardBackend::new(
                    data_dir.join(LEADERBOARD_FILE),
                )),
            };
        let blobs: Arc<dyn BlobBackend> = match remote_blobs.filter(|_| selection.photo_blob) {
            Some(blobs) => blobs,
            None => Arc::new(LocalBlobBackend::new(config.uploads_dir.clone())),
        };

        let stores = Self {
            rsvps: RsvpStore::new(rsvp_backend, directory),
            photos: PhotoStore::new(photo_index, blobs),
            leaderboard: LeaderboardStore::new(leaderboard_backend),
        };
        info!(
            rsvp = stores.rsvps.backend_name(),
            photo_metadata = stores.photos.index_backend_name(),
            photo_blob = stores.photos.blob_backend_name(),
            leaderboard = stores.leaderboard.backend_name(),
            "storage backends selected"
        );
        stores
    }
}

/// Connect the remote clients required by `selection`.
#[cfg(feature = "remote-store")]
pub fn connect_remote(
    config: &AppConfig,
    selection: BackendSelection,
) -> Result<(Option<Arc<dyn KeyValueStore>>, Option<Arc<dyn BlobBackend>>), BackendInitError> {
    use crate::dao::{
        blob_store::{BlobConfig, DEFAULT_BLOB_API_URL, RemoteBlobBackend},
        kv::rest::{KvConfig, RestKvStore},
    };

    let kv = match (&config.kv_url, &config.kv_token) {
        (Some(url), Some(token)) if selection.needs_kv() => {
            let store = RestKvStore::connect(KvConfig::new(url.clone(), token.clone()))?;
            Some(Arc::new(store) as Arc<dyn KeyValueStore>)
        }
        _ => None,
    };

    let blobs = match &config.blob_token {
        Some(token) if selection.photo_blob => {
            let api_url = config
                .blob_api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BLOB_API_URL.to_owned());
            let backend = RemoteBlobBackend::connect(BlobConfig::new(api_url, token.clone()))?;
            Some(Arc::new(backend) as Arc<dyn BlobBackend>)
        }
        _ => None,
    };

    Ok((kv, blobs))
}

/// Without the `remote-store` feature there is nothing to connect.
#[cfg(not(feature = "remote-store"))]
pub fn connect_remote(
    _config: &AppConfig,
    _selection: BackendSelection,
) -> Result<(Option<Arc<dyn KeyValueStore>>, Option<Arc<dyn BlobBackend>>), BackendInitError> {
    Ok((None, None))
}
