//! Gallery uploads. A batch is checked as a whole before anything is stored,
//! so one bad file rejects the upload without leaving half of it behind.

use tracing::info;
use validator::Validate;

use crate::{
    dao::photo_store::{MAX_FILES_PER_UPLOAD, validate},
    dto::photo::{ExternalPhotoRequest, PhotoDto, UploadBatch, UploadedFile},
    error::ServiceError,
    state::SharedState,
};

/// Gallery, newest first.
pub async fn list(state: &SharedState) -> Result<Vec<PhotoDto>, ServiceError> {
    let photos = state.photos().list_all().await?;
    Ok(photos.into_iter().map(PhotoDto::from).collect())
}

/// Check the uploader name, the batch size and every file's type and size.
pub fn check_batch(batch: &UploadBatch) -> Result<(), ServiceError> {
    batch.validate()?;

    if batch.files.is_empty() {
        return Err(ServiceError::InvalidInput("No files provided".into()));
    }
    if batch.files.len() > MAX_FILES_PER_UPLOAD {
        return Err(ServiceError::InvalidInput(format!(
            "Maximum {MAX_FILES_PER_UPLOAD} files per upload"
        )));
    }

    for file in &batch.files {
        validate(&file.mime_type, file.bytes.len() as u64)
            .map_err(|err| ServiceError::InvalidInput(format!("{}: {err}", file.file_name)))?;
    }
    Ok(())
}

/// Validate then store every file of the batch, in form order.
pub async fn upload(state: &SharedState, batch: UploadBatch) -> Result<Vec<PhotoDto>, ServiceError> {
    check_batch(&batch)?;

    let uploader_name = batch.uploader_name.trim();
    let mut saved = Vec::with_capacity(batch.files.len());
    for UploadedFile {
        file_name,
        mime_type,
        bytes,
    } in batch.files
    {
        let size = bytes.len() as u64;
        let photo = state
            .photos()
            .save(bytes, uploader_name, &file_name, &mime_type, size)
            .await?;
        saved.push(PhotoDto::from(photo));
    }

    info!(uploader = uploader_name, count = saved.len(), "photos uploaded");
    Ok(saved)
}

/// Register a photo hosted elsewhere, under the same type and size policy.
pub async fn save_external(
    state: &SharedState,
    request: ExternalPhotoRequest,
) -> Result<PhotoDto, ServiceError> {
    validate(&request.mime_type, request.file_size)?;
    let photo = state
        .photos()
        .save_from_external_url(
            &request.url,
            request.uploader_name.trim(),
            &request.file_name,
            request.file_size,
            &request.mime_type,
        )
        .await?;
    info!(id = %photo.id, url = %photo.blob_url, "external photo registered");
    Ok(photo.into())
}
