//! Contact message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact message entity
///
/// Stored as `is_read` in the database; serialized as `read` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "read")]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a contact message
#[derive(Debug, Clone)]
pub struct CreateContactMessageInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
