//! Timeline API endpoints
//!
//! - GET /timeline - List life events chronologically
//! - POST /timeline - Create a timeline event

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{paged, ApiResponse};
use crate::api::validation::require_fields;
use crate::db::repositories::{SqlxTimelineRepository, TimelineRepository};
use crate::models::{CreateTimelineEventInput, ListParams, TimelineEvent};

/// Query parameters for listing timeline events
#[derive(Debug, Deserialize)]
pub struct ListTimelineQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub category: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Request body for creating a timeline event
#[derive(Debug, Deserialize)]
pub struct CreateTimelineEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub importance: String,
}

/// Build the timeline router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_timeline).post(create_timeline_event))
}

/// GET /timeline - List timeline events
pub async fn list_timeline(
    State(state): State<AppState>,
    Query(query): Query<ListTimelineQuery>,
) -> Result<Json<ApiResponse<Vec<TimelineEvent>>>, ApiError> {
    let repo = SqlxTimelineRepository::new(state.pool.clone());
    let params = ListParams::new(query.page, query.limit);

    let result = repo.list(query.category.as_deref(), &params).await?;
    Ok(Json(paged(result)))
}

/// POST /timeline - Create a timeline event
pub async fn create_timeline_event(
    State(state): State<AppState>,
    Json(req): Json<CreateTimelineEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TimelineEvent>>), ApiError> {
    require_fields(&[
        ("title", &req.title),
        ("description", &req.description),
        ("date", &req.date),
        ("category", &req.category),
        ("importance", &req.importance),
    ])?;

    let repo = SqlxTimelineRepository::new(state.pool.clone());
    let input = CreateTimelineEventInput {
        title: req.title,
        description: req.description,
        date: req.date,
        category: req.category,
        importance: req.importance,
    };

    let event = repo.create(&input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}
