use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UserNotFound(_)
            | StoreError::BuildingNotFound(_)
            | StoreError::ClassroomNotFound(_)
            | StoreError::BookingNotFound(_) => ApiError::NotFound(value.to_string()),
            StoreError::UnknownBuilding(_)
            | StoreError::UnknownClassroom(_)
            | StoreError::InvalidTimeRange => {
                ApiError::BadRequest(value.to_string())
            }
            StoreError::SlotUnavailable { conflicting } => {
                warn!(%conflicting, "booking rejected, slot taken");
                ApiError::Conflict(value.to_string())
            }
            StoreError::EmailTaken(_)
            | StoreError::BuildingInUse(_)
            | StoreError::ClassroomInUse(_) => ApiError::Conflict(value.to_string()),
        }
    }
}

// Extractor rejections surface as JSON 400s like every other client error.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
