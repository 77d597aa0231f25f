//! Timeline repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::models::{CreateTimelineEventInput, ListParams, PagedResult, TimelineEvent};

const TIMELINE_COLUMNS: &str = "id, title, description, date, category, importance, created_at";

/// Timeline repository trait
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Create a new timeline event
    async fn create(&self, input: &CreateTimelineEventInput) -> Result<TimelineEvent>;

    /// List events chronologically by event date, optionally filtered by
    /// category
    async fn list(&self, category: Option<&str>, params: &ListParams) -> Result<PagedResult<TimelineEvent>>;
}

/// SQLx-based timeline repository implementation
pub struct SqlxTimelineRepository {
    pool: SqlitePool,
}

impl SqlxTimelineRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineRepository for SqlxTimelineRepository {
    async fn create(&self, input: &CreateTimelineEventInput) -> Result<TimelineEvent> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO timeline_events (title, description, date, category, importance, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.date)
        .bind(&input.category)
        .bind(&input.importance)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create timeline event")?;

        Ok(TimelineEvent {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            description: input.description.clone(),
            date: input.date.clone(),
            category: input.category.clone(),
            importance: input.importance.clone(),
            created_at: now,
        })
    }

    async fn list(&self, category: Option<&str>, params: &ListParams) -> Result<PagedResult<TimelineEvent>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());

        let mut where_sql = String::new();
        if category.is_some() {
            where_sql.push_str(" WHERE category = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM timeline_events{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(category) = category {
            count_query = count_query.bind(category.to_string());
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count timeline events")?;

        // Life events read oldest-first
        let list_sql = format!(
            "SELECT {} FROM timeline_events{} ORDER BY date ASC, created_at ASC LIMIT ? OFFSET ?",
            TIMELINE_COLUMNS, where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(category) = category {
            list_query = list_query.bind(category.to_string());
        }
        let rows = list_query
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list timeline events")?;

        let items = rows.iter().map(row_to_event).collect();
        Ok(PagedResult::new(items, total, params))
    }
}

fn row_to_event(row: &SqliteRow) -> TimelineEvent {
    TimelineEvent {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        date: row.get("date"),
        category: row.get("category"),
        importance: row.get("importance"),
        created_at: row.get("created_at"),
    }
}
