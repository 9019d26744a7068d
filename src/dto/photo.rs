use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::models::PhotoEntity,
    dto::validation::{validate_not_blank, validate_uploader_name},
};

/// Metadata of a gallery photo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDto {
    pub id: String,
    pub uploader_name: String,
    pub file_name: String,
    pub blob_url: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub uploaded_at: OffsetDateTime,
    pub file_size: u64,
    pub mime_type: String,
}

impl From<PhotoEntity> for PhotoDto {
    fn from(photo: PhotoEntity) -> Self {
        Self {
            id: photo.id,
            uploader_name: photo.uploader_name,
            file_name: photo.file_name,
            blob_url: photo.blob_url,
            uploaded_at: photo.uploaded_at,
            file_size: photo.file_size,
            mime_type: photo.mime_type,
        }
    }
}

/// Gallery listing, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoListResponse {
    pub photos: Vec<PhotoDto>,
}

/// Multipart form accepted by `POST /photos` (documentation only).
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PhotoUploadForm {
    pub uploader_name: String,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}

/// One file extracted from the upload form.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Upload batch extracted from the multipart form.
#[derive(Debug, Validate)]
pub struct UploadBatch {
    #[validate(custom(function = "validate_uploader_name"))]
    pub uploader_name: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadPhotosResponse {
    pub success: bool,
    pub photos: Vec<PhotoDto>,
    pub message: String,
}

/// Register a photo whose binary was already uploaded elsewhere.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPhotoRequest {
    #[validate(url)]
    pub url: String,
    #[validate(custom(function = "validate_uploader_name"))]
    pub uploader_name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExternalPhotoResponse {
    pub success: bool,
    pub photo: PhotoDto,
}
