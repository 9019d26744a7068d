use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get},
};

use crate::{
    dto::admin::{
        ActionResponse, AdminGuestsQuery, AdminGuestsResponse, AdminPhotosResponse,
        ClearRsvpsResponse, ExportResponse,
    },
    error::AppError,
    services::admin_service,
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin-only dashboard, export and maintenance endpoints.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/guests", get(list_guests))
        .route("/admin/export", get(export_guests))
        .route("/admin/rsvps", delete(clear_rsvps))
        .route("/admin/photos", get(list_photos))
        .route("/admin/photos/{id}", delete(delete_photo))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// Guest list joined with responses, dashboard totals and storage status.
#[utoipa::path(
    get,
    path = "/admin/guests",
    tag = "admin",
    params(
        ("X-Admin-Token" = String, Header, description = "Shared admin secret"),
        AdminGuestsQuery
    ),
    responses((status = 200, description = "Guests with their responses", body = AdminGuestsResponse))
)]
pub async fn list_guests(
    State(state): State<SharedState>,
    Query(query): Query<AdminGuestsQuery>,
) -> Json<AdminGuestsResponse> {
    let filter = query.filter.unwrap_or_default();
    Json(admin_service::guests(&state, filter).await)
}

/// Rows of the guest spreadsheet export.
#[utoipa::path(
    get,
    path = "/admin/export",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Shared admin secret")),
    responses((status = 200, description = "Export rows", body = ExportResponse))
)]
pub async fn export_guests(State(state): State<SharedState>) -> Json<ExportResponse> {
    Json(admin_service::export(&state).await)
}

/// Delete every RSVP.
#[utoipa::path(
    delete,
    path = "/admin/rsvps",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Shared admin secret")),
    responses(
        (status = 200, description = "Responses cleared", body = ClearRsvpsResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn clear_rsvps(
    State(state): State<SharedState>,
) -> Result<Json<ClearRsvpsResponse>, AppError> {
    let deleted = admin_service::clear_rsvps(&state).await?;
    Ok(Json(ClearRsvpsResponse {
        success: true,
        deleted,
        message: format!("Cleared {deleted} RSVPs"),
    }))
}

#[utoipa::path(
    get,
    path = "/admin/photos",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Shared admin secret")),
    responses(
        (status = 200, description = "Gallery with photo count", body = AdminPhotosResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn list_photos(
    State(state): State<SharedState>,
) -> Result<Json<AdminPhotosResponse>, AppError> {
    Ok(Json(admin_service::photos(&state).await?))
}

/// Delete a photo's binary and metadata.
#[utoipa::path(
    delete,
    path = "/admin/photos/{id}",
    tag = "admin",
    params(
        ("X-Admin-Token" = String, Header, description = "Shared admin secret"),
        ("id" = String, Path, description = "Identifier of the photo to delete")
    ),
    responses(
        (status = 200, description = "Photo deleted", body = ActionResponse),
        (status = 404, description = "Unknown photo")
    )
)]
pub async fn delete_photo(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    admin_service::delete_photo(&state, &id).await?;
    Ok(Json(ActionResponse {
        success: true,
        message: "Photo deleted successfully".into(),
    }))
}

async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    if state.check_admin_secret(provided) {
        Ok(next.run(req).await)
    } else {
        Err(AppError::Unauthorized("invalid admin token".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tempfile::TempDir;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };

    use crate::{
        config::AppConfig,
        dao::directory::{directory_of, guest},
        dto::rsvp::SubmitRsvpRequest,
        routes,
        services::rsvp_service,
        state::AppState,
    };

    const SECRET: &str = "s3cret";

    async fn serve(dir: &TempDir) -> SocketAddr {
        let config = AppConfig {
            admin_password: SECRET.into(),
            data_dir: dir.path().join("data"),
            uploads_dir: dir.path().join("uploads"),
            ..AppConfig::default()
        };
        let state = AppState::local(config, directory_of(vec![guest("g1", "Alice Martin", 2)]));
        rsvp_service::submit(
            &state,
            SubmitRsvpRequest {
                guest_id: "g1".into(),
                seats_confirmed: 2,
                dietary_restrictions: String::new(),
            },
        )
        .await
        .unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = routes::router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn clear_rsvps(addr: SocketAddr, token: Option<&str>) -> (u16, String) {
        let header = token
            .map(|token| format!("X-Admin-Token: {token}\r\n"))
            .unwrap_or_default();
        let request = format!(
            "DELETE /admin/rsvps HTTP/1.1\r\nHost: {addr}\r\n{header}Connection: close\r\n\r\n"
        );

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        let (head, body) = response.split_once("\r\n\r\n").unwrap();
        let status = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|code| code.parse().ok())
            .unwrap();
        (status, body.to_owned())
    }

    #[tokio::test]
    async fn admin_routes_require_the_shared_secret() {
        let dir = TempDir::new().unwrap();
        let addr = serve(&dir).await;

        let (status, body) = clear_rsvps(addr, None).await;
        assert_eq!(status, 401);
        assert!(body.contains("X-Admin-Token"));

        let (status, _) = clear_rsvps(addr, Some("wrong")).await;
        assert_eq!(status, 401);

        let (status, body) = clear_rsvps(addr, Some(SECRET)).await;
        assert_eq!(status, 200);
        assert!(body.contains("\"deleted\":1"));

        let (status, body) = clear_rsvps(addr, Some(SECRET)).await;
        assert_eq!(status, 200);
        assert!(body.contains("\"deleted\":0"));
    }
}
