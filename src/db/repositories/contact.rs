//! Contact message repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::models::{ContactMessage, CreateContactMessageInput, ListParams, PagedResult};

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, is_read, created_at";

/// Contact message repository trait
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Create a new contact message. Always stored unread.
    async fn create(&self, input: &CreateContactMessageInput) -> Result<ContactMessage>;

    /// List messages newest first, optionally filtered by read flag
    async fn list(&self, read: Option<bool>, params: &ListParams) -> Result<PagedResult<ContactMessage>>;
}

/// SQLx-based contact message repository implementation
pub struct SqlxContactRepository {
    pool: SqlitePool,
}

impl SqlxContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepository {
    async fn create(&self, input: &CreateContactMessageInput) -> Result<ContactMessage> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO contact_messages (name, email, subject, message, is_read, created_at)
               VALUES (?, ?, ?, ?, 0, ?)"#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(&input.message)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create contact message")?;

        Ok(ContactMessage {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            is_read: false,
            created_at: now,
        })
    }

    async fn list(&self, read: Option<bool>, params: &ListParams) -> Result<PagedResult<ContactMessage>> {
        let mut where_sql = String::new();
        if read.is_some() {
            where_sql.push_str(" WHERE is_read = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM contact_messages{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(read) = read {
            count_query = count_query.bind(read);
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count contact messages")?;

        let list_sql = format!(
            "SELECT {} FROM contact_messages{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            CONTACT_COLUMNS, where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(read) = read {
            list_query = list_query.bind(read);
        }
        let rows = list_query
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list contact messages")?;

        let items = rows.iter().map(row_to_message).collect();
        Ok(PagedResult::new(items, total, params))
    }
}

fn row_to_message(row: &SqliteRow) -> ContactMessage {
    ContactMessage {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        subject: row.get("subject"),
        message: row.get("message"),
        is_read: row.get("is_read"),
        created_at: row.get("created_at"),
    }
}
