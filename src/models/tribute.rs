//! Tribute model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tribute entity
///
/// A tribute is publicly visible only once a moderator has approved it and
/// the submitter has not marked it private.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tribute {
    pub id: i64,
    pub name: String,
    pub relationship: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub is_approved: bool,
    pub is_featured: bool,
    pub is_private: bool,
    pub likes: i64,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a tribute
///
/// Submissions are always stored unapproved; there is intentionally no way
/// for the caller to influence the approval flag.
#[derive(Debug, Clone)]
pub struct CreateTributeInput {
    pub name: String,
    pub relationship: String,
    pub message: String,
    pub title: Option<String>,
    pub is_private: bool,
}

/// Approval status filter for the admin listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    Approved,
    Pending,
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            _ => Err(format!("Invalid approval status: {}", s)),
        }
    }
}

/// Filters accepted by the admin tribute listing
#[derive(Debug, Clone, Default)]
pub struct AdminTributeFilter {
    /// Restrict to approved or pending tributes
    pub status: Option<ApprovalStatus>,
    /// Case-insensitive substring match over name, relationship, message
    /// and title
    pub search: Option<String>,
}
