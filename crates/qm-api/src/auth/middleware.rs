use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use uuid::Uuid;

use super::jwt::verify_jwt_token;
use crate::{error::ApiError, state::ApiState};

/// Authenticated user extractor
///
/// Use this in route handlers to ensure the caller is authenticated. It
/// validates the `Authorization: Bearer` token and exposes the user id
/// the session-ownership checks compare against.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Email from the token claims
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    ApiState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ApiState::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Auth("Not authenticated".to_string()))?;

        let claims = verify_jwt_token(token, &state.jwt_secret)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Auth("Invalid user ID in token".to_string()))?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}
