//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the Memoria backend:
//! - Tribute endpoints (public submission, listing, likes)
//! - Gallery endpoints
//! - Timeline endpoints
//! - Contact endpoints
//! - Admin moderation endpoints (bearer-token gated)

pub mod admin;
pub mod contact;
pub mod gallery;
pub mod middleware;
pub mod responses;
pub mod timeline;
pub mod tributes;
pub mod validation;


use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{AdminUser, ApiError, AppState};
pub use responses::{ApiResponse, Pagination};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Admin routes: bearer token fully verified on every route
    let admin_routes = Router::new()
        .nest("/admin", admin::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    Router::new()
        .nest("/tributes", tributes::router())
        .nest("/gallery", gallery::router())
        .nest("/timeline", timeline::router())
        .nest("/contact", contact::router())
        .route("/health", get(health))
        .merge(admin_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    if let Ok(origin) = cors_origin.parse::<HeaderValue>() {
        cors = cors.allow_origin(origin);
    }

    Router::new()
        .merge(build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check including a database ping
async fn health(State(state): State<AppState>) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    crate::db::ping(&state.pool).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "status": "ok" }))))
}
