//! Gallery image model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gallery image entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i64,
    pub src: String,
    pub alt: String,
    pub category: String,
    pub uploaded_by: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a gallery image
#[derive(Debug, Clone)]
pub struct CreateGalleryImageInput {
    pub src: String,
    pub alt: String,
    pub category: String,
    pub uploaded_by: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub is_approved: bool,
}

/// Filters accepted by the public gallery listing
#[derive(Debug, Clone, Default)]
pub struct GalleryFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Tag overlap: an image matches when it carries any of these tags
    pub tags: Vec<String>,
    /// Restrict to featured images
    pub featured_only: bool,
}
