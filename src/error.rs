use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::{
    photo_store::PhotoValidationError, rsvp_store::RsvpError, storage::StorageError,
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<RsvpError> for ServiceError {
    fn from(err: RsvpError) -> Self {
        match err {
            RsvpError::UnknownGuest(_) => ServiceError::NotFound(err.to_string()),
            RsvpError::SeatsOutOfRange { .. } => ServiceError::InvalidInput(err.to_string()),
            RsvpError::Storage(source) => ServiceError::Unavailable(source),
        }
    }
}

impl From<PhotoValidationError> for ServiceError {
    fn from(err: PhotoValidationError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unauthorized access attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

impl AppError {
    /// HTTP status carried by this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsvp_errors_map_to_http_statuses() {
        let range = AppError::from(ServiceError::from(RsvpError::SeatsOutOfRange {
            seats: 5,
            max: 3,
        }));
        assert_eq!(range.status(), StatusCode::BAD_REQUEST);
        assert!(range.to_string().contains("Seats must be between 0 and 3"));

        let unknown = AppError::from(ServiceError::from(RsvpError::UnknownGuest("g9".into())));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_errors_are_unavailable() {
        let err = StorageError::unavailable(
            "kv down".into(),
            std::io::Error::other("connection refused"),
        );
        let app = AppError::from(ServiceError::from(err));
        assert_eq!(app.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
