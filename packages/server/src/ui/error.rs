//! Mapping from use case errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::ErrorDto,
    usecase::{CreateRoomError, LookupError},
};

/// An error reported synchronously to the HTTP caller as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<CreateRoomError> for ApiError {
    fn from(error: CreateRoomError) -> Self {
        match error {
            CreateRoomError::InvalidName(e) => ApiError::bad_request(e.to_string()),
            CreateRoomError::AlreadyExists(_) => {
                ApiError::new(StatusCode::CONFLICT, "Room already exists")
            }
            CreateRoomError::Registry(e) => {
                tracing::error!(error = %e, "Unexpected registry error");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::InvalidName(_) => ApiError::bad_request("Room name is required"),
            LookupError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "Room not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorDto { error: self.message })).into_response()
    }
}
