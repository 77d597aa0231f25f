//! Tribute repository
//!
//! Carries the moderation operations: approve stamps the record in a single
//! UPDATE, toggle and like are single-statement atomic writes so concurrent
//! requests cannot lose updates.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::escape_like;
use crate::models::{AdminTributeFilter, ApprovalStatus, CreateTributeInput, ListParams, PagedResult, Tribute};

const TRIBUTE_COLUMNS: &str = "id, name, relationship, message, title, is_approved, is_featured, is_private, likes, approved_at, approved_by, created_at";

/// Columns the free-text search may touch. User input selects the term,
/// never the fields.
const SEARCH_CLAUSE: &str = "(LOWER(name) LIKE ? ESCAPE '\\' OR LOWER(relationship) LIKE ? ESCAPE '\\' OR LOWER(message) LIKE ? ESCAPE '\\' OR LOWER(COALESCE(title, '')) LIKE ? ESCAPE '\\')";
const SEARCH_BIND_COUNT: usize = 4;

/// Tribute repository trait
#[async_trait]
pub trait TributeRepository: Send + Sync {
    /// Create a new tribute. Always stored unapproved.
    async fn create(&self, input: &CreateTributeInput) -> Result<Tribute>;

    /// Get a tribute by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Tribute>>;

    /// List approved, non-private tributes, newest first
    async fn list_public(&self, featured_only: bool, params: &ListParams) -> Result<PagedResult<Tribute>>;

    /// List all tributes for moderation, with status and search filters
    async fn list_admin(&self, filter: &AdminTributeFilter, params: &ListParams) -> Result<PagedResult<Tribute>>;

    /// Approve a tribute, stamping the approval time and actor.
    ///
    /// Re-approving re-stamps `approved_at`; the flags stay true. Returns
    /// `None` when no tribute has the given id.
    async fn approve(&self, id: i64, approved_by: &str) -> Result<Option<Tribute>>;

    /// Invert the featured flag in a single atomic UPDATE
    async fn toggle_featured(&self, id: i64) -> Result<Option<Tribute>>;

    /// Increment the like counter in a single atomic UPDATE
    async fn add_like(&self, id: i64) -> Result<Option<Tribute>>;
}

/// SQLx-based tribute repository implementation
pub struct SqlxTributeRepository {
    pool: SqlitePool,
}

impl SqlxTributeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TributeRepository for SqlxTributeRepository {
    async fn create(&self, input: &CreateTributeInput) -> Result<Tribute> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO tributes (name, relationship, message, title, is_approved, is_featured, is_private, likes, created_at)
               VALUES (?, ?, ?, ?, 0, 0, ?, 0, ?)"#,
        )
        .bind(&input.name)
        .bind(&input.relationship)
        .bind(&input.message)
        .bind(&input.title)
        .bind(input.is_private)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create tribute")?;

        let id = result.last_insert_rowid();

        Ok(Tribute {
            id,
            name: input.name.clone(),
            relationship: input.relationship.clone(),
            message: input.message.clone(),
            title: input.title.clone(),
            is_approved: false,
            is_featured: false,
            is_private: input.is_private,
            likes: 0,
            approved_at: None,
            approved_by: None,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Tribute>> {
        let sql = format!("SELECT {} FROM tributes WHERE id = ?", TRIBUTE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get tribute by ID")?;

        Ok(row.map(|r| row_to_tribute(&r)))
    }

    async fn list_public(&self, featured_only: bool, params: &ListParams) -> Result<PagedResult<Tribute>> {
        let mut where_sql = String::from(" WHERE is_approved = 1 AND is_private = 0");
        if featured_only {
            where_sql.push_str(" AND is_featured = 1");
        }

        let count_sql = format!("SELECT COUNT(*) FROM tributes{}", where_sql);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count tributes")?;

        let list_sql = format!(
            "SELECT {} FROM tributes{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            TRIBUTE_COLUMNS, where_sql
        );
        let rows = sqlx::query(&list_sql)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list tributes")?;

        let items = rows.iter().map(row_to_tribute).collect();
        Ok(PagedResult::new(items, total, params))
    }

    async fn list_admin(&self, filter: &AdminTributeFilter, params: &ListParams) -> Result<PagedResult<Tribute>> {
        let approved = filter.status.map(|s| s == ApprovalStatus::Approved);
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(&s.to_lowercase())));

        let mut where_sql = String::new();
        if approved.is_some() {
            where_sql.push_str(" WHERE is_approved = ?");
        }
        if pattern.is_some() {
            where_sql.push_str(if where_sql.is_empty() { " WHERE " } else { " AND " });
            where_sql.push_str(SEARCH_CLAUSE);
        }

        let count_sql = format!("SELECT COUNT(*) FROM tributes{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(approved) = approved {
            count_query = count_query.bind(approved);
        }
        if let Some(ref pattern) = pattern {
            for _ in 0..SEARCH_BIND_COUNT {
                count_query = count_query.bind(pattern.clone());
            }
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count tributes for moderation")?;

        let list_sql = format!(
            "SELECT {} FROM tributes{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            TRIBUTE_COLUMNS, where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(approved) = approved {
            list_query = list_query.bind(approved);
        }
        if let Some(ref pattern) = pattern {
            for _ in 0..SEARCH_BIND_COUNT {
                list_query = list_query.bind(pattern.clone());
            }
        }
        let rows = list_query
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list tributes for moderation")?;

        let items = rows.iter().map(row_to_tribute).collect();
        Ok(PagedResult::new(items, total, params))
    }

    async fn approve(&self, id: i64, approved_by: &str) -> Result<Option<Tribute>> {
        let result = sqlx::query(
            "UPDATE tributes SET is_approved = 1, approved_at = ?, approved_by = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(approved_by)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to approve tribute")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    async fn toggle_featured(&self, id: i64) -> Result<Option<Tribute>> {
        let result = sqlx::query("UPDATE tributes SET is_featured = NOT is_featured WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to toggle featured flag")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    async fn add_like(&self, id: i64) -> Result<Option<Tribute>> {
        let result = sqlx::query("UPDATE tributes SET likes = likes + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to like tribute")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }
}

fn row_to_tribute(row: &SqliteRow) -> Tribute {
    Tribute {
        id: row.get("id"),
        name: row.get("name"),
        relationship: row.get("relationship"),
        message: row.get("message"),
        title: row.get("title"),
        is_approved: row.get("is_approved"),
        is_featured: row.get("is_featured"),
        is_private: row.get("is_private"),
        likes: row.get("likes"),
        approved_at: row.get("approved_at"),
        approved_by: row.get("approved_by"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, pool::create_test_pool};

    async fn test_repo() -> SqlxTributeRepository {
        let pool = create_test_pool().await.expect("Failed to create pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxTributeRepository::new(pool)
    }

    fn input(name: &str) -> CreateTributeInput {
        CreateTributeInput {
            name: name.to_string(),
            relationship: "Friend".to_string(),
            message: format!("A memory from {}", name),
            title: None,
            is_private: false,
        }
    }

    #[tokio::test]
    async fn test_create_is_always_unapproved() {
        let repo = test_repo().await;
        let tribute = repo.create(&input("Ada")).await.unwrap();

        assert!(!tribute.is_approved);
        assert!(tribute.approved_at.is_none());
        assert_eq!(tribute.likes, 0);

        let stored = repo.get_by_id(tribute.id).await.unwrap().unwrap();
        assert!(!stored.is_approved);
    }

    #[tokio::test]
    async fn test_public_list_hides_unapproved_and_private() {
        let repo = test_repo().await;
        let visible = repo.create(&input("Visible")).await.unwrap();
        repo.approve(visible.id, "admin").await.unwrap();

        let unapproved = repo.create(&input("Pending")).await.unwrap();

        let mut private = input("Private");
        private.is_private = true;
        let private = repo.create(&private).await.unwrap();
        repo.approve(private.id, "admin").await.unwrap();

        let page = repo
            .list_public(false, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, visible.id);
        assert!(page.items.iter().all(|t| t.id != unapproved.id));
    }

    #[tokio::test]
    async fn test_public_list_featured_filter() {
        let repo = test_repo().await;
        let plain = repo.create(&input("Plain")).await.unwrap();
        repo.approve(plain.id, "admin").await.unwrap();

        let featured = repo.create(&input("Featured")).await.unwrap();
        repo.approve(featured.id, "admin").await.unwrap();
        repo.toggle_featured(featured.id).await.unwrap();

        let page = repo
            .list_public(true, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, featured.id);
    }

    #[tokio::test]
    async fn test_approve_stamps_and_restamps() {
        let repo = test_repo().await;
        let tribute = repo.create(&input("Ada")).await.unwrap();

        let first = repo.approve(tribute.id, "admin").await.unwrap().unwrap();
        assert!(first.is_approved);
        assert_eq!(first.approved_by.as_deref(), Some("admin"));
        let first_stamp = first.approved_at.expect("approved_at should be set");

        // Approving again keeps the flag but re-stamps the timestamp
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.approve(tribute.id, "admin").await.unwrap().unwrap();
        assert!(second.is_approved);
        let second_stamp = second.approved_at.expect("approved_at should be set");
        assert!(second_stamp > first_stamp);
    }

    #[tokio::test]
    async fn test_approve_missing_returns_none() {
        let repo = test_repo().await;
        assert!(repo.approve(9999, "admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_featured_twice_round_trips() {
        let repo = test_repo().await;
        let tribute = repo.create(&input("Ada")).await.unwrap();
        assert!(!tribute.is_featured);

        let toggled = repo.toggle_featured(tribute.id).await.unwrap().unwrap();
        assert!(toggled.is_featured);

        let toggled = repo.toggle_featured(tribute.id).await.unwrap().unwrap();
        assert!(!toggled.is_featured);
    }

    #[tokio::test]
    async fn test_add_like_increments() {
        let repo = test_repo().await;
        let tribute = repo.create(&input("Ada")).await.unwrap();

        let liked = repo.add_like(tribute.id).await.unwrap().unwrap();
        assert_eq!(liked.likes, 1);
        let liked = repo.add_like(tribute.id).await.unwrap().unwrap();
        assert_eq!(liked.likes, 2);
    }

    #[tokio::test]
    async fn test_add_like_missing_returns_none() {
        let repo = test_repo().await;
        assert!(repo.add_like(424242).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_admin_list_status_filter() {
        let repo = test_repo().await;
        let approved = repo.create(&input("Approved")).await.unwrap();
        repo.approve(approved.id, "admin").await.unwrap();
        let pending = repo.create(&input("Pending")).await.unwrap();

        let filter = AdminTributeFilter {
            status: Some(ApprovalStatus::Pending),
            search: None,
        };
        let page = repo.list_admin(&filter, &ListParams::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, pending.id);

        let filter = AdminTributeFilter {
            status: Some(ApprovalStatus::Approved),
            search: None,
        };
        let page = repo.list_admin(&filter, &ListParams::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, approved.id);
    }

    #[tokio::test]
    async fn test_admin_list_search_is_case_insensitive_substring() {
        let repo = test_repo().await;
        repo.create(&input("Margaret")).await.unwrap();
        repo.create(&input("Henry")).await.unwrap();

        let filter = AdminTributeFilter {
            status: None,
            search: Some("ARGA".to_string()),
        };
        let page = repo.list_admin(&filter, &ListParams::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Margaret");
    }

    #[tokio::test]
    async fn test_admin_search_escapes_wildcards() {
        let repo = test_repo().await;
        let mut percent = input("Percent");
        percent.message = "gave 100% always".to_string();
        repo.create(&percent).await.unwrap();
        let mut plain = input("Plain");
        plain.message = "gave 1000 reasons".to_string();
        repo.create(&plain).await.unwrap();

        // "%" must match literally, not as a wildcard
        let filter = AdminTributeFilter {
            status: None,
            search: Some("100%".to_string()),
        };
        let page = repo.list_admin(&filter, &ListParams::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Percent");
    }

    #[tokio::test]
    async fn test_admin_list_pagination() {
        let repo = test_repo().await;
        for i in 0..25 {
            repo.create(&input(&format!("Person {}", i))).await.unwrap();
        }

        let filter = AdminTributeFilter::default();
        let page = repo
            .list_admin(&filter, &ListParams::new(3, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages(), 3);
    }
}
