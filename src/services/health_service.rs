use tracing::warn;

use crate::{
    dto::health::{BackendsSummary, HealthResponse},
    state::SharedState,
};

/// Report the selected backends and whether the remote store answers a ping.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let backends = BackendsSummary {
        rsvp: state.rsvps().backend_name().to_owned(),
        photo_metadata: state.photos().index_backend_name().to_owned(),
        photo_blob: state.photos().blob_backend_name().to_owned(),
        leaderboard: state.leaderboard().backend_name().to_owned(),
    };

    let Some(kv) = state.kv() else {
        return HealthResponse::ok(backends);
    };

    match kv.ping().await {
        Ok(()) => HealthResponse::ok(backends),
        Err(err) => {
            warn!(error = %err, "key-value store health check failed");
            HealthResponse::degraded(backends)
        }
    }
}
