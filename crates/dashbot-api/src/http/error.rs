//! Error types mapping to HTTP responses.
//!
//! [`AppError`] renders the JSON envelope for the session API.
//! [`WebhookRejection`] renders GitHub-facing plain-text bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use dashbot_types::error::{SessionError, WebhookError};

use crate::http::response::ApiResponse;

/// Application-level error for the session API.
#[derive(Debug)]
pub enum AppError {
    Session(SessionError),
    /// Malformed request input.
    Validation(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Session(SessionError::MissingLink) => {
                (StatusCode::BAD_REQUEST, "MISSING_LINK")
            }
            AppError::Session(SessionError::WrongChannel { .. }) => {
                (StatusCode::FORBIDDEN, "WRONG_CHANNEL")
            }
            AppError::Session(SessionError::NoActiveSession) => {
                (StatusCode::NOT_FOUND, "NO_ACTIVE_SESSION")
            }
            AppError::Session(SessionError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = match &self {
            AppError::Session(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        };

        if status.is_server_error() {
            tracing::error!(code, error = %message, "session request failed");
        }

        let body = ApiResponse::error(code, &message, uuid::Uuid::now_v7().to_string(), 0);
        (status, Json(body)).into_response()
    }
}

/// A webhook delivery refused before it reached the notification queue.
#[derive(Debug)]
pub struct WebhookRejection(pub WebhookError);

impl From<WebhookError> for WebhookRejection {
    fn from(e: WebhookError) -> Self {
        WebhookRejection(e)
    }
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        match self.0 {
            WebhookError::SignatureInvalid => {
                (StatusCode::UNAUTHORIZED, "Invalid signature").into_response()
            }
            WebhookError::PayloadMalformed(_) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON").into_response()
            }
        }
    }
}
