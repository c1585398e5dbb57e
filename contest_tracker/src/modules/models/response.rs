use axum::{http::StatusCode, Json};
use contest_tracker_libs::{api::ErrorResponse, service::ServiceError};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl ToString) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

/// Maps a failed solution-link submission to its response.
pub fn solution_error(e: &ServiceError) -> ApiError {
    match e {
        ServiceError::ValidationError(_)
        | ServiceError::UnknownPlatform(_)
        | ServiceError::PlatformMismatch { .. } => api_error(StatusCode::BAD_REQUEST, e),
        ServiceError::ContestNotFound(_) => api_error(StatusCode::NOT_FOUND, e),
        ServiceError::PlatformUnavailable(_) => api_error(StatusCode::SERVICE_UNAVAILABLE, e),
        ServiceError::StoreError(_) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to add solution link",
        ),
    }
}
