//! API middleware
//!
//! Contains:
//! - Application state shared by all handlers
//! - The API error taxonomy and its envelope mapping
//! - The admin authorization gate (bearer token, fully verified)

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{self, AdminIdentity};
use crate::config::AuthConfig;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthConfig>,
}

/// Verified admin identity extracted from the request
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminIdentity);

/// API error taxonomy
///
/// Every handler failure is converted into one of these and rendered as the
/// common response envelope; nothing propagates past the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The underlying cause is logged server-side; callers only see the
        // generic message.
        if let Self::Internal(ref err) = self {
            tracing::error!("Internal error: {:#}", err);
        }

        let status = self.status_code();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Admin authorization middleware.
///
/// Extracts the bearer token and fully verifies it against the configured
/// signing secret. Applied to every admin route; there is no presence-only
/// variant.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(auth::extract_bearer)
        .and_then(|token| auth::verify_token(&state.auth, token))
        .ok_or_else(|| ApiError::unauthorized("Missing or invalid bearer token"))?;

    request.extensions_mut().insert(AdminUser(identity));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        let err = ApiError::from(anyhow::anyhow!("connection refused to db at 10.0.0.3"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
