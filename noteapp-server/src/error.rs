//! Error handling for the NoteApp server

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use noteapp::NoteAppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Where anonymous callers are sent to obtain a token
pub const LOGIN_PATH: &str = "/api/auth/login";

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// NoteApp library error
    #[error(transparent)]
    NoteApp(#[from] NoteAppError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Action disabled by server configuration
    #[error("{0}")]
    Forbidden(String),

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

/// JSON request body whose rejections use the API error shape
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NoteApp(err) => match err {
                NoteAppError::SelfReference | NoteAppError::Validation(_) => {
                    StatusCode::BAD_REQUEST
                }
                NoteAppError::UnknownUser(_) | NoteAppError::NotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                NoteAppError::Duplicate { .. } | NoteAppError::Conflict(_) => StatusCode::CONFLICT,
                NoteAppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                NoteAppError::Forbidden { .. } => StatusCode::FORBIDDEN,
                NoteAppError::Configuration(_)
                | NoteAppError::Logging(_)
                | NoteAppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::NoteApp(err) => match err {
                NoteAppError::SelfReference => "self_reference",
                NoteAppError::Duplicate { .. } => "duplicate",
                NoteAppError::UnknownUser(_) => "unknown_user",
                NoteAppError::NotAuthenticated => "not_authenticated",
                NoteAppError::Forbidden { .. } => "forbidden",
                NoteAppError::NotFound { .. } => "not_found",
                NoteAppError::Validation(_) => "validation_error",
                NoteAppError::Conflict(_) => "conflict",
                NoteAppError::Configuration(_)
                | NoteAppError::Logging(_)
                | NoteAppError::Storage(_) => "internal_error",
            },
            ServerError::Auth(_) => "authentication_error",
            ServerError::Forbidden(_) => "forbidden",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) => "internal_error",
        }
    }

    /// Message shown to the client. Internal failures are not described.
    fn public_message(&self) -> String {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            "Something went wrong".to_string()
        } else {
            self.to_string()
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServerError::NoteApp(NoteAppError::NotAuthenticated) | ServerError::Auth(_) => {
                Some(serde_json::json!({ "login": LOGIN_PATH }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }

        let error_response = ErrorResponse {
            success: false,
            error: self.error_type().to_string(),
            message: self.public_message(),
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteapp::storage::errors::StorageError;

    #[test]
    fn test_friend_outcomes_map_to_statuses() {
        let cases = [
            (NoteAppError::SelfReference, StatusCode::BAD_REQUEST),
            (NoteAppError::UnknownUser("x".into()), StatusCode::NOT_FOUND),
            (
                NoteAppError::Duplicate {
                    user_id: "a".into(),
                    friend_id: "b".into(),
                },
                StatusCode::CONFLICT,
            ),
            (NoteAppError::NotAuthenticated, StatusCode::UNAUTHORIZED),
            (
                NoteAppError::Forbidden {
                    resource: "post",
                    action: "edit",
                },
                StatusCode::FORBIDDEN,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_storage_failures_are_not_described() {
        let err = ServerError::from(NoteAppError::Storage(StorageError::Query(
            "table friendship is locked".into(),
        )));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Something went wrong");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_not_authenticated_points_at_login() {
        let err = ServerError::from(NoteAppError::NotAuthenticated);
        assert_eq!(err.details().unwrap()["login"], LOGIN_PATH);
    }
}
