use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::BackendError;
use crate::application::services::ConversationError;
use crate::domain::TranscriptError;

/// Error body shared by every API route: `{"error": {"message": "..."}}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

#[derive(Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

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
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: ErrorMessage {
                    message: self.message,
                },
            }),
        )
            .into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, e.message)
    }
}

impl From<ConversationError> for ApiError {
    fn from(e: ConversationError) -> Self {
        match e {
            ConversationError::SessionNotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ConversationError::EmptyQuestion => Self::bad_request(e.to_string()),
            ConversationError::Turn(TranscriptError::TurnNotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, e.to_string())
            }
            ConversationError::Turn(
                TranscriptError::AlreadyResolved(_) | TranscriptError::InFlight(_),
            ) => {
                Self::new(StatusCode::CONFLICT, e.to_string())
            }
            ConversationError::Backend(backend) => backend.into(),
        }
    }
}
