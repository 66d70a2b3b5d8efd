use crate::error::{AppError, AppResult};
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the access token issued on login.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: Uuid,
        email: String,
        username: String,
        expiration_hours: i64,
    ) -> AppResult<Self> {
        let now = Timestamp::now();
        let exp = now
            .checked_add(SignedDuration::from_hours(expiration_hours))
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("token expiry out of range: {}", e),
            })?;

        Ok(Self {
            sub: user_id.to_string(),
            email,
            username,
            iat: now.as_second(),
            exp: exp.as_second(),
        })
    }
}

/// Signs an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: Uuid,
    email: String,
    username: String,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, username, expiration_hours)?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}
