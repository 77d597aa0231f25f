//! Timeline event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timeline event entity
///
/// Events have no approval gate; they are curated content. The public
/// listing orders them chronologically by the `date` field, so ISO dates
/// (`1952-06-14`) sort correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: String,
    pub importance: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a timeline event
#[derive(Debug, Clone)]
pub struct CreateTimelineEventInput {
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: String,
    pub importance: String,
}
