//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes.

use mb_live::LiveError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "ROOM_NOT_FOUND", "CAPACITY_EXCEEDED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Present and true when the same request may succeed if retried
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Request conflicts with the room's current membership (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        code: &'static str,
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Missing or malformed caller identity (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Temporarily unable to serve the request (503)
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        code: &'static str,
        message: String,
        retryable: bool,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound { code, message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: (*code).into(),
                    message: message.clone(),
                    field: None,
                    retryable: false,
                },
            ),
            ApiError::Conflict { code, message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: (*code).into(),
                    message: message.clone(),
                    field: None,
                    retryable: false,
                },
            ),
            ApiError::Validation {
                code,
                message,
                field,
                ..
            } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: (*code).into(),
                    message: message.clone(),
                    field: field.clone(),
                    retryable: false,
                },
            ),
            ApiError::Unauthorized { message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".into(),
                    message: message.clone(),
                    field: None,
                    retryable: false,
                },
            ),
            ApiError::Unavailable {
                code,
                message,
                retryable,
                ..
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: (*code).into(),
                    message: message.clone(),
                    field: None,
                    retryable: *retryable,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message: message.clone(),
                    field: None,
                    retryable: false,
                },
            ),
        };

        // Full error, with location, stays server-side
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert membership engine errors to API errors
impl From<LiveError> for ApiError {
    #[track_caller]
    fn from(e: LiveError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let code = e.error_code();
        let message = e.client_message();

        match e {
            LiveError::RoomNotFound { .. } => ApiError::NotFound {
                code,
                message,
                location,
            },
            LiveError::CapacityExceeded { .. }
            | LiveError::DuplicateJoin { .. }
            | LiveError::NotMember { .. }
            | LiveError::RoomAlreadyExists { .. } => ApiError::Conflict {
                code,
                message,
                location,
            },
            LiveError::InvalidCapacity { .. } => ApiError::Validation {
                code,
                message,
                field: Some("capacity".into()),
                location,
            },
            LiveError::PersistenceFailure { .. } | LiveError::BroadcastUnavailable { .. } => {
                log::warn!("Membership engine unavailable: {}", e);
                ApiError::Unavailable {
                    code,
                    message,
                    retryable: e.is_retryable(),
                    location,
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
