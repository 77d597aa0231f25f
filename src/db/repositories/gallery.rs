//! Gallery repository
//!
//! Tags are stored as a JSON array in a TEXT column; tag-overlap queries go
//! through `json_each` so matching stays in the database and pagination
//! counts stay correct.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::models::{CreateGalleryImageInput, GalleryFilter, GalleryImage, ListParams, PagedResult};

const GALLERY_COLUMNS: &str =
    "id, src, alt, category, uploaded_by, tags, is_featured, is_approved, created_at";

const TAG_MATCH_CLAUSE: &str =
    "EXISTS (SELECT 1 FROM json_each(gallery_images.tags) WHERE json_each.value = ?)";

/// Gallery repository trait
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Create a new gallery image
    async fn create(&self, input: &CreateGalleryImageInput) -> Result<GalleryImage>;

    /// Get an image by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<GalleryImage>>;

    /// List approved images, newest first, filtered by category, tag
    /// overlap and featured flag
    async fn list(&self, filter: &GalleryFilter, params: &ListParams) -> Result<PagedResult<GalleryImage>>;
}

/// SQLx-based gallery repository implementation
pub struct SqlxGalleryRepository {
    pool: SqlitePool,
}

impl SqlxGalleryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryRepository for SqlxGalleryRepository {
    async fn create(&self, input: &CreateGalleryImageInput) -> Result<GalleryImage> {
        let now = Utc::now();
        let tags_json = serde_json::to_string(&input.tags).context("Failed to encode tags")?;

        let result = sqlx::query(
            r#"INSERT INTO gallery_images (src, alt, category, uploaded_by, tags, is_featured, is_approved, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&input.src)
        .bind(&input.alt)
        .bind(&input.category)
        .bind(&input.uploaded_by)
        .bind(&tags_json)
        .bind(input.is_featured)
        .bind(input.is_approved)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create gallery image")?;

        Ok(GalleryImage {
            id: result.last_insert_rowid(),
            src: input.src.clone(),
            alt: input.alt.clone(),
            category: input.category.clone(),
            uploaded_by: input.uploaded_by.clone(),
            tags: input.tags.clone(),
            is_featured: input.is_featured,
            is_approved: input.is_approved,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<GalleryImage>> {
        let sql = format!("SELECT {} FROM gallery_images WHERE id = ?", GALLERY_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get gallery image by ID")?;

        Ok(row.map(|r| row_to_image(&r)))
    }

    async fn list(&self, filter: &GalleryFilter, params: &ListParams) -> Result<PagedResult<GalleryImage>> {
        let category = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        let tags: Vec<&String> = filter.tags.iter().filter(|t| !t.trim().is_empty()).collect();

        let mut where_sql = String::from(" WHERE is_approved = 1");
        if category.is_some() {
            where_sql.push_str(" AND category = ?");
        }
        if filter.featured_only {
            where_sql.push_str(" AND is_featured = 1");
        }
        if !tags.is_empty() {
            where_sql.push_str(" AND (");
            for (i, _) in tags.iter().enumerate() {
                if i > 0 {
                    where_sql.push_str(" OR ");
                }
                where_sql.push_str(TAG_MATCH_CLAUSE);
            }
            where_sql.push(')');
        }

        let count_sql = format!("SELECT COUNT(*) FROM gallery_images{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(category) = category {
            count_query = count_query.bind(category.to_string());
        }
        for tag in &tags {
            count_query = count_query.bind((*tag).clone());
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .context("Failed to count gallery images")?;

        let list_sql = format!(
            "SELECT {} FROM gallery_images{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            GALLERY_COLUMNS, where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(category) = category {
            list_query = list_query.bind(category.to_string());
        }
        for tag in &tags {
            list_query = list_query.bind((*tag).clone());
        }
        let rows = list_query
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list gallery images")?;

        let items = rows.iter().map(row_to_image).collect();
        Ok(PagedResult::new(items, total, params))
    }
}

fn row_to_image(row: &SqliteRow) -> GalleryImage {
    let tags: String = row.get("tags");
    GalleryImage {
        id: row.get("id"),
        src: row.get("src"),
        alt: row.get("alt"),
        category: row.get("category"),
        uploaded_by: row.get("uploaded_by"),
        tags: serde_json::from_str(&tags).unwrap_or_default(),
        is_featured: row.get("is_featured"),
        is_approved: row.get("is_approved"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, pool::create_test_pool};

    async fn test_repo() -> SqlxGalleryRepository {
        let pool = create_test_pool().await.expect("Failed to create pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxGalleryRepository::new(pool)
    }

    fn input(src: &str, category: &str, tags: &[&str]) -> CreateGalleryImageInput {
        CreateGalleryImageInput {
            src: src.to_string(),
            alt: format!("Photo {}", src),
            category: category.to_string(),
            uploaded_by: "family".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_featured: false,
            is_approved: true,
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_tags() {
        let repo = test_repo().await;
        let image = repo
            .create(&input("a.jpg", "family", &["wedding", "1972"]))
            .await
            .unwrap();

        let stored = repo.get_by_id(image.id).await.unwrap().unwrap();
        assert_eq!(stored.tags, vec!["wedding", "1972"]);
    }

    #[tokio::test]
    async fn test_list_category_filter() {
        let repo = test_repo().await;
        repo.create(&input("a.jpg", "family", &[])).await.unwrap();
        repo.create(&input("b.jpg", "travel", &[])).await.unwrap();

        let filter = GalleryFilter {
            category: Some("travel".to_string()),
            ..Default::default()
        };
        let page = repo.list(&filter, &ListParams::new(1, 20)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].src, "b.jpg");
    }

    #[tokio::test]
    async fn test_list_tag_overlap() {
        let repo = test_repo().await;
        repo.create(&input("a.jpg", "family", &["wedding", "1972"]))
            .await
            .unwrap();
        repo.create(&input("b.jpg", "family", &["garden"]))
            .await
            .unwrap();
        repo.create(&input("c.jpg", "family", &[])).await.unwrap();

        // Any shared tag matches
        let filter = GalleryFilter {
            tags: vec!["garden".to_string(), "1972".to_string()],
            ..Default::default()
        };
        let page = repo.list(&filter, &ListParams::new(1, 20)).await.unwrap();
        assert_eq!(page.total, 2);
        let srcs: Vec<&str> = page.items.iter().map(|i| i.src.as_str()).collect();
        assert!(srcs.contains(&"a.jpg"));
        assert!(srcs.contains(&"b.jpg"));
    }

    #[tokio::test]
    async fn test_list_hides_unapproved() {
        let repo = test_repo().await;
        let mut hidden = input("hidden.jpg", "family", &[]);
        hidden.is_approved = false;
        repo.create(&hidden).await.unwrap();
        repo.create(&input("shown.jpg", "family", &[])).await.unwrap();

        let page = repo
            .list(&GalleryFilter::default(), &ListParams::new(1, 20))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].src, "shown.jpg");
    }

    #[tokio::test]
    async fn test_list_featured_filter() {
        let repo = test_repo().await;
        let mut featured = input("star.jpg", "family", &[]);
        featured.is_featured = true;
        repo.create(&featured).await.unwrap();
        repo.create(&input("plain.jpg", "family", &[])).await.unwrap();

        let filter = GalleryFilter {
            featured_only: true,
            ..Default::default()
        };
        let page = repo.list(&filter, &ListParams::new(1, 20)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].src, "star.jpg");
    }
}
