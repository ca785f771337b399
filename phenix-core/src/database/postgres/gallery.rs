use async_trait::async_trait;
use chrono::{DateTime, Utc};
use phenix_model::{Category, GalleryEntry, GalleryEntryDraft, GalleryOrder};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::database::ports::GalleryRepository;
use crate::error::{CoreError, Result};

const ENTRY_COLUMNS: &str =
    "id, title, description, category, images, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresGalleryRepository {
    pool: PgPool,
}

impl PostgresGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<GalleryEntry> {
        let id: i32 = row.try_get("id").map_err(|e| {
            CoreError::Internal(format!("Failed to read entry id: {e}"))
        })?;
        let title: String = row.try_get("title").map_err(|e| {
            CoreError::Internal(format!("Failed to read entry title: {e}"))
        })?;
        let description: String = row.try_get("description").map_err(|e| {
            CoreError::Internal(format!("Failed to read description: {e}"))
        })?;
        let category: String = row.try_get("category").map_err(|e| {
            CoreError::Internal(format!("Failed to read category: {e}"))
        })?;
        let images: Vec<String> = row.try_get("images").map_err(|e| {
            CoreError::Internal(format!("Failed to read images: {e}"))
        })?;
        let created_at: DateTime<Utc> =
            row.try_get("created_at").map_err(|e| {
                CoreError::Internal(format!("Failed to read created_at: {e}"))
            })?;
        let updated_at: DateTime<Utc> =
            row.try_get("updated_at").map_err(|e| {
                CoreError::Internal(format!("Failed to read updated_at: {e}"))
            })?;

        Ok(GalleryEntry {
            id,
            title,
            description,
            category: category
                .parse()
                .map_err(|e| CoreError::Internal(format!("{e}")))?,
            images,
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl GalleryRepository for PostgresGalleryRepository {
    async fn list(
        &self,
        category: Category,
        order: GalleryOrder,
    ) -> Result<Vec<GalleryEntry>> {
        let order_by = match order {
            GalleryOrder::IdAscending => "id ASC",
            GalleryOrder::NewestFirst => "created_at DESC, id DESC",
        };
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM gallery_entries WHERE category = $1 ORDER BY {order_by}"
        );

        let rows = sqlx::query(&sql)
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                CoreError::Database(format!("Failed to list entries: {e}"))
            })?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn find(
        &self,
        id: i32,
        category: Category,
    ) -> Result<Option<GalleryEntry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM gallery_entries WHERE id = $1 AND category = $2"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(category.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                CoreError::Database(format!("Failed to load entry {id}: {e}"))
            })?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn create(
        &self,
        category: Category,
        draft: GalleryEntryDraft,
    ) -> Result<GalleryEntry> {
        let sql = format!(
            r#"
            INSERT INTO gallery_entries (title, description, category, images)
            VALUES ($1, $2, $3, $4)
            RETURNING {ENTRY_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(draft.title)
            .bind(draft.description)
            .bind(category.as_str())
            .bind(draft.images)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                CoreError::Database(format!("Failed to create entry: {e}"))
            })?;

        Self::map_row(&row)
    }

    async fn update(
        &self,
        id: i32,
        category: Category,
        draft: GalleryEntryDraft,
    ) -> Result<Option<GalleryEntry>> {
        let sql = format!(
            r#"
            UPDATE gallery_entries
            SET title = $1, description = $2, images = $3, updated_at = NOW()
            WHERE id = $4 AND category = $5
            RETURNING {ENTRY_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.images)
            .bind(id)
            .bind(category.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                CoreError::Database(format!("Failed to update entry {id}: {e}"))
            })?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i32, category: Category) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM gallery_entries WHERE id = $1 AND category = $2",
        )
        .bind(id)
        .bind(category.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to delete entry {id}: {e}"))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, category: Category) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM gallery_entries WHERE category = $1",
        )
        .bind(category.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to count entries: {e}"))
        })?;

        row.try_get("total").map_err(|e| {
            CoreError::Internal(format!("Failed to read entry count: {e}"))
        })
    }
}
