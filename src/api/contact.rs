//! Contact API endpoints
//!
//! - POST /contact - Send a contact message
//! - GET /contact - List messages, filterable by read flag

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{paged, ApiResponse};
use crate::api::validation::{require_email, require_fields};
use crate::db::repositories::{ContactRepository, SqlxContactRepository};
use crate::models::{ContactMessage, CreateContactMessageInput, ListParams};

/// Query parameters for listing contact messages
#[derive(Debug, Deserialize)]
pub struct ListContactQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Filter by read flag
    pub read: Option<bool>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Request body for sending a contact message
#[derive(Debug, Deserialize)]
pub struct CreateContactMessageRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Build the contact router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_messages).post(create_message))
}

/// GET /contact - List contact messages
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListContactQuery>,
) -> Result<Json<ApiResponse<Vec<ContactMessage>>>, ApiError> {
    let repo = SqlxContactRepository::new(state.pool.clone());
    let params = ListParams::new(query.page, query.limit);

    let result = repo.list(query.read, &params).await?;
    Ok(Json(paged(result)))
}

/// POST /contact - Send a contact message
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateContactMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessage>>), ApiError> {
    require_fields(&[
        ("name", &req.name),
        ("email", &req.email),
        ("subject", &req.subject),
        ("message", &req.message),
    ])?;
    require_email(&req.email)?;

    let repo = SqlxContactRepository::new(state.pool.clone());
    let input = CreateContactMessageInput {
        name: req.name,
        email: req.email,
        subject: req.subject,
        message: req.message,
    };

    let message = repo.create(&input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}
