use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Claims carried by the platform-issued access token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a string
    pub sub: String,
    /// User email
    #[serde(default)]
    pub email: String,
    /// Expiry, seconds since epoch
    pub exp: usize,
    /// Issued-at, seconds since epoch
    pub iat: usize,
}

/// Verify and decode a JWT token
pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header};
    use uuid::Uuid;

    fn make_token(secret: &str, exp_offset_secs: i64) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "learner@example.com".to_string(),
            iat: now.timestamp() as usize,
            exp: (now.timestamp() + exp_offset_secs) as usize,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let token = make_token("secret", 3600);
        let claims = verify_jwt_token(&token, "secret").unwrap();
        assert_eq!(claims.email, "learner@example.com");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = make_token("secret", 3600);
        assert!(verify_jwt_token(&token, "other").is_err());
    }

    #[test]
    fn test_expired_rejected() {
        let token = make_token("secret", -3600);
        assert!(verify_jwt_token(&token, "secret").is_err());
    }
}
