//! Admin API endpoints
//!
//! Moderation surface for tributes. Every route here sits behind the
//! `require_admin` middleware, which fully verifies the bearer token.
//!
//! - GET /admin/tributes - List all tributes with status/search filters
//! - PATCH /admin/tributes/{id}/approve - Approve a tribute
//! - PATCH /admin/tributes/{id}/feature - Toggle the featured flag

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{AdminUser, ApiError, AppState};
use crate::api::responses::{paged, ApiResponse};
use crate::db::repositories::{SqlxTributeRepository, TributeRepository};
use crate::models::{AdminTributeFilter, ListParams, Tribute};

/// Actor label stamped on approvals
const APPROVED_BY: &str = "admin";

/// Query parameters for the moderation listing
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// "approved" or "pending"; anything else lists all
    pub status: Option<String>,
    /// Case-insensitive substring search over name, relationship, message
    /// and title
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Build the admin router. The auth middleware is layered on in
/// `api::build_api_router`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tributes", get(list_tributes))
        .route("/tributes/{id}/approve", patch(approve_tribute))
        .route("/tributes/{id}/feature", patch(toggle_feature))
}

/// GET /admin/tributes - List tributes for moderation
pub async fn list_tributes(
    State(state): State<AppState>,
    _user: AdminUser,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<ApiResponse<Vec<Tribute>>>, ApiError> {
    let repo = SqlxTributeRepository::new(state.pool.clone());
    let params = ListParams::new(query.page, query.limit);

    let filter = AdminTributeFilter {
        status: query.status.as_deref().and_then(|s| s.parse().ok()),
        search: query.search,
    };

    let result = repo.list_admin(&filter, &params).await?;
    Ok(Json(paged(result)))
}

/// PATCH /admin/tributes/{id}/approve - Approve a tribute
///
/// Re-approving keeps the flags but re-stamps the approval time.
pub async fn approve_tribute(
    State(state): State<AppState>,
    _user: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Tribute>>, ApiError> {
    let repo = SqlxTributeRepository::new(state.pool.clone());

    let tribute = repo
        .approve(id, APPROVED_BY)
        .await?
        .ok_or_else(|| ApiError::not_found("Tribute not found"))?;

    Ok(Json(ApiResponse::ok(tribute).with_message("Tribute approved")))
}

/// PATCH /admin/tributes/{id}/feature - Toggle the featured flag
pub async fn toggle_feature(
    State(state): State<AppState>,
    _user: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Tribute>>, ApiError> {
    let repo = SqlxTributeRepository::new(state.pool.clone());

    let tribute = repo
        .toggle_featured(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tribute not found"))?;

    let label = if tribute.is_featured {
        "featured"
    } else {
        "unfeatured"
    };
    let message = format!("Tribute {}", label);

    Ok(Json(ApiResponse::ok(tribute).with_message(message)))
}
