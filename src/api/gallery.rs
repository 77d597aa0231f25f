//! Gallery API endpoints
//!
//! - GET /gallery - List approved images, filterable by category, tags and
//!   featured flag
//! - POST /gallery - Upload an image record

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
use crate::db::repositories::{GalleryRepository, SqlxGalleryRepository};
use crate::models::{CreateGalleryImageInput, GalleryFilter, GalleryImage, ListParams};

/// Query parameters for listing gallery images
#[derive(Debug, Deserialize)]
pub struct ListGalleryQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub category: Option<String>,
    /// Comma-separated tag list; an image matches when it carries any of
    /// the tags
    pub tags: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// Request body for uploading a gallery image record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryImageRequest {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_approved: bool,
}

fn default_true() -> bool {
    true
}

/// Build the gallery router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_gallery).post(create_gallery_image))
}

/// GET /gallery - List approved gallery images
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(query): Query<ListGalleryQuery>,
) -> Result<Json<ApiResponse<Vec<GalleryImage>>>, ApiError> {
    let repo = SqlxGalleryRepository::new(state.pool.clone());
    let params = ListParams::new(query.page, query.limit);

    let tags = query
        .tags
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let filter = GalleryFilter {
        category: query.category,
        tags,
        featured_only: query.featured,
    };

    let result = repo.list(&filter, &params).await?;
    Ok(Json(paged(result)))
}

/// POST /gallery - Create a gallery image record
pub async fn create_gallery_image(
    State(state): State<AppState>,
    Json(req): Json<CreateGalleryImageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GalleryImage>>), ApiError> {
    require_fields(&[
        ("src", &req.src),
        ("alt", &req.alt),
        ("category", &req.category),
        ("uploadedBy", &req.uploaded_by),
    ])?;

    let repo = SqlxGalleryRepository::new(state.pool.clone());
    let input = CreateGalleryImageInput {
        src: req.src,
        alt: req.alt,
        category: req.category,
        uploaded_by: req.uploaded_by,
        tags: req.tags,
        is_featured: req.is_featured,
        is_approved: req.is_approved,
    };

    let image = repo.create(&input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(image))))
}
