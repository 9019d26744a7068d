use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::Field},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dao::photo_store::{MAX_FILE_SIZE, MAX_FILES_PER_UPLOAD},
    dto::photo::{
        ExternalPhotoRequest, ExternalPhotoResponse, PhotoListResponse, PhotoUploadForm,
        UploadBatch, UploadPhotosResponse, UploadedFile,
    },
    error::AppError,
    services::photo_service,
    state::SharedState,
};

const UPLOADER_FIELD: &str = "uploaderName";
const FILES_FIELD: &str = "files";
/// Room for a full batch plus form overhead; per-file limits are enforced after parsing.
const UPLOAD_BODY_LIMIT: usize = MAX_FILES_PER_UPLOAD * MAX_FILE_SIZE as usize + 1024 * 1024;

/// Public gallery routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/photos",
            get(list_photos)
                .post(upload_photos)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/photos/external", post(register_external_photo))
}

#[utoipa::path(
    get,
    path = "/photos",
    tag = "photos",
    responses(
        (status = 200, description = "Gallery, newest first", body = PhotoListResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn list_photos(State(state): State<SharedState>) -> Result<Json<PhotoListResponse>, AppError> {
    let photos = photo_service::list(&state).await?;
    Ok(Json(PhotoListResponse { photos }))
}

/// Upload up to ten images in one multipart form.
#[utoipa::path(
    post,
    path = "/photos",
    tag = "photos",
    request_body(content = PhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photos stored", body = UploadPhotosResponse),
        (status = 400, description = "Invalid name, batch or file"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn upload_photos(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<UploadPhotosResponse>, AppError> {
    let batch = read_upload_form(multipart).await?;
    let photos = photo_service::upload(&state, batch).await?;
    Ok(Json(UploadPhotosResponse {
        success: true,
        message: format!("{} photo(s) uploaded successfully", photos.len()),
        photos,
    }))
}

/// Record a photo whose binary is already hosted elsewhere.
#[utoipa::path(
    post,
    path = "/photos/external",
    tag = "photos",
    request_body = ExternalPhotoRequest,
    responses(
        (status = 200, description = "Photo registered", body = ExternalPhotoResponse),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn register_external_photo(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<ExternalPhotoRequest>>,
) -> Result<Json<ExternalPhotoResponse>, AppError> {
    let photo = photo_service::save_external(&state, payload).await?;
    Ok(Json(ExternalPhotoResponse {
        success: true,
        photo,
    }))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadBatch, AppError> {
    let mut uploader_name = String::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(UPLOADER_FIELD) => uploader_name = field.text().await.map_err(bad_form)?,
            Some(FILES_FIELD) => files.push(read_file(field).await?),
            _ => {}
        }
    }

    Ok(UploadBatch {
        uploader_name,
        files,
    })
}

async fn read_file(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let file_name = field.file_name().unwrap_or("photo").to_owned();
    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_owned();
    let bytes = field.bytes().await.map_err(bad_form)?;
    Ok(UploadedFile {
        file_name,
        mime_type,
        bytes: bytes.to_vec(),
    })
}

fn bad_form(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("invalid upload form: {}", err.body_text()))
}
