//! Tribute API endpoints
//!
//! Handles HTTP requests for tributes:
//! - GET /tributes - List approved public tributes with pagination
//! - POST /tributes - Submit a tribute (stored unapproved)
//! - POST /tributes/{id}/like - Increment the like counter

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{paged, ApiResponse};
use crate::api::validation::require_fields;
use crate::db::repositories::{SqlxTributeRepository, TributeRepository};
use crate::models::{CreateTributeInput, ListParams, Tribute};

/// Query parameters for listing tributes
#[derive(Debug, Deserialize)]
pub struct ListTributesQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Restrict to featured tributes
    #[serde(default)]
    pub featured: bool,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Request body for submitting a tribute
///
/// An `isApproved` value in the body is ignored: submissions are always
/// stored unapproved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTributeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub message: String,
    pub title: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Build the tributes router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tributes).post(create_tribute))
        .route("/{id}/like", post(like_tribute))
}

/// GET /tributes - List approved, non-private tributes
pub async fn list_tributes(
    State(state): State<AppState>,
    Query(query): Query<ListTributesQuery>,
) -> Result<Json<ApiResponse<Vec<Tribute>>>, ApiError> {
    let repo = SqlxTributeRepository::new(state.pool.clone());
    let params = ListParams::new(query.page, query.limit);

    let result = repo.list_public(query.featured, &params).await?;
    Ok(Json(paged(result)))
}

/// POST /tributes - Submit a tribute
pub async fn create_tribute(
    State(state): State<AppState>,
    Json(req): Json<CreateTributeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tribute>>), ApiError> {
    require_fields(&[
        ("name", &req.name),
        ("relationship", &req.relationship),
        ("message", &req.message),
    ])?;

    let repo = SqlxTributeRepository::new(state.pool.clone());
    let input = CreateTributeInput {
        name: req.name,
        relationship: req.relationship,
        message: req.message,
        title: req.title,
        is_private: req.is_private,
    };

    let tribute = repo.create(&input).await?;
    let body = ApiResponse::ok(tribute).with_message("Tribute submitted for review");
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /tributes/{id}/like - Like a tribute
pub async fn like_tribute(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Tribute>>, ApiError> {
    let repo = SqlxTributeRepository::new(state.pool.clone());

    let tribute = repo
        .add_like(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tribute not found"))?;

    Ok(Json(ApiResponse::ok(tribute)))
}
