use async_trait::async_trait;
use chrono::{DateTime, Utc};
use phenix_model::{ContactMessage, NewContactMessage};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::database::ports::ContactRepository;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<ContactMessage> {
        let read = |column: &str, e: sqlx::Error| {
            CoreError::Internal(format!("Failed to read {column}: {e}"))
        };

        let created_at: DateTime<Utc> =
            row.try_get("created_at").map_err(|e| read("created_at", e))?;

        Ok(ContactMessage {
            id: row.try_get("id").map_err(|e| read("id", e))?,
            name: row.try_get("name").map_err(|e| read("name", e))?,
            email: row.try_get("email").map_err(|e| read("email", e))?,
            phone: row.try_get("phone").map_err(|e| read("phone", e))?,
            subject: row.try_get("subject").map_err(|e| read("subject", e))?,
            message: row.try_get("message").map_err(|e| read("message", e))?,
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| read("ip_address", e))?,
            user_agent: row
                .try_get("user_agent")
                .map_err(|e| read("user_agent", e))?,
            created_at,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage> {
        let row = sqlx::query(
            r#"
            INSERT INTO contact_messages
                (name, email, phone, subject, message, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, name, email, phone, subject, message,
                ip_address, user_agent, created_at
            "#,
        )
        .bind(message.name)
        .bind(message.email)
        .bind(message.phone)
        .bind(message.subject)
        .bind(message.message)
        .bind(message.ip_address)
        .bind(message.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to store contact message: {e}"))
        })?;

        Self::map_row(&row)
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT
                id, name, email, phone, subject, message,
                ip_address, user_agent, created_at
            FROM contact_messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            CoreError::Database(format!("Failed to list contact messages: {e}"))
        })?;

        rows.iter().map(Self::map_row).collect()
    }
}
