use async_trait::async_trait;
use phenix_model::EmailRecipient;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::database::ports::EmailRecipientRepository;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone)]
pub struct PostgresEmailRecipientRepository {
    pool: PgPool,
}

impl PostgresEmailRecipientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<EmailRecipient> {
        let read = |column: &str, e: sqlx::Error| {
            CoreError::Internal(format!("Failed to read {column}: {e}"))
        };

        Ok(EmailRecipient {
            id: row.try_get("id").map_err(|e| read("id", e))?,
            email: row.try_get("email").map_err(|e| read("email", e))?,
            is_active: row.try_get("is_active").map_err(|e| read("is_active", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| read("created_at", e))?,
        })
    }
}

#[async_trait]
impl EmailRecipientRepository for PostgresEmailRecipientRepository {
    async fn active_recipient(&self) -> Result<Option<EmailRecipient>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, is_active, created_at
            FROM email_recipients
            WHERE is_active
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to load email recipient: {e}"))
        })?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn ensure_default(&self, email: &str) -> Result<EmailRecipient> {
        let existing = sqlx::query(
            "SELECT id, email, is_active, created_at FROM email_recipients ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to load email recipient: {e}"))
        })?;

        if let Some(row) = existing {
            return Self::map_row(&row);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO email_recipients (email, is_active)
            VALUES ($1, TRUE)
            RETURNING id, email, is_active, created_at
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to create email recipient: {e}"))
        })?;

        info!(email, "created default notification recipient");
        Self::map_row(&row)
    }
}
