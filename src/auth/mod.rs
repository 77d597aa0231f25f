//! Admin bearer tokens
//!
//! Moderator actions are authorized by a signed bearer token checked against
//! the configured signing secret. Verification failures of any kind
//! (missing, malformed, expired, wrong signature) yield no identity; nothing
//! in this module panics on untrusted input.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Claims carried by an admin token
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl AdminClaims {
    pub fn new(username: String, role: String, expiry_hours: u32) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username,
            role,
            iat: now.timestamp(),
            exp,
        }
    }
}

/// Verified admin identity derived from a token's claims
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
    pub role: String,
    pub issued_at: DateTime<Utc>,
}

impl From<AdminClaims> for AdminIdentity {
    fn from(claims: AdminClaims) -> Self {
        Self {
            username: claims.username,
            role: claims.role,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Signing secret is empty")]
    EmptySecret,
    #[error("Token generation failed: {0}")]
    Generation(String),
}

/// Issue a signed admin token from the configured secret
pub fn issue_token(config: &AuthConfig, username: &str, role: &str) -> Result<String, TokenError> {
    if config.jwt_secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let claims = AdminClaims::new(
        username.to_string(),
        role.to_string(),
        config.token_expiry_hours,
    );
    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify a bearer token against the configured secret.
///
/// Returns `None` on any verification failure.
pub fn verify_token(config: &AuthConfig, token: &str) -> Option<AdminIdentity> {
    if config.jwt_secret.is_empty() {
        return None;
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let validation = Validation::default();

    match decode::<AdminClaims>(token, &decoding_key, &validation) {
        Ok(data) => Some(data.claims.into()),
        Err(e) => {
            tracing::debug!("Token verification failed: {}", e);
            None
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
