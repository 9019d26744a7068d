use serde::Serialize;
use utoipa::ToSchema;

/// Backend serving each data domain (`local`, `kv` or `blob`).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackendsSummary {
    pub rsvp: String,
    pub photo_metadata: String,
    pub photo_blob: String,
    pub leaderboard: String,
}

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    pub backends: BackendsSummary,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(backends: BackendsSummary) -> Self {
        Self {
            status: "ok".to_string(),
            backends,
        }
    }

    /// Create a health response indicating the remote store did not answer.
    pub fn degraded(backends: BackendsSummary) -> Self {
        Self {
            status: "degraded".to_string(),
            backends,
        }
    }
}
