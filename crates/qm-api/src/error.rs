use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use qm_engine::SessionError;

/// Error taxonomy of the assessment API.
///
/// AI generation failures never appear here: the generator absorbs them
/// and serves fallback content instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown, expired, or already-completed quiz session
    #[error("Invalid quiz session")]
    SessionNotFound,
    /// The session exists but belongs to another user
    #[error("Not authorized for this session")]
    Forbidden,
    /// The referenced question id does not resolve
    #[error("Question not found")]
    QuestionNotFound,
    /// Missing or invalid bearer token
    #[error("Authentication error: {0}")]
    Auth(String),
    /// The request payload failed validation
    #[error("Validation error: {0}")]
    Validation(String),
    /// Underlying database failure
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound => Self::SessionNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::SessionNotFound => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::QuestionNotFound => StatusCode::NOT_FOUND,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(err) => {
                tracing::error!("database error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Don't leak internals to the client
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::SessionNotFound.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::QuestionNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Auth("no token".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Validation("bad count".into())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_session_error_converts() {
        let err: ApiError = SessionError::NotFound.into();
        assert!(matches!(err, ApiError::SessionNotFound));
    }
}
