mod contact;
mod gallery;
mod recipients;

pub use contact::PostgresContactRepository;
pub use gallery::PostgresGalleryRepository;
pub use recipients::PostgresEmailRecipientRepository;

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{fmt, time::Duration};
use tracing::info;

use crate::error::{CoreError, Result};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    gallery: PostgresGalleryRepository,
    contacts: PostgresContactRepository,
    recipients: PostgresEmailRecipientRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn connect(
        connection_string: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(connection_string)
            .await
            .map_err(|e| {
                CoreError::Database(format!("Database connection failed: {e}"))
            })?;

        info!(max_connections, "database pool initialized");
        Ok(Self::from_pool(pool, max_connections))
    }

    pub fn from_pool(pool: PgPool, max_connections: u32) -> Self {
        Self {
            gallery: PostgresGalleryRepository::new(pool.clone()),
            contacts: PostgresContactRepository::new(pool.clone()),
            recipients: PostgresEmailRecipientRepository::new(pool.clone()),
            pool,
            max_connections,
        }
    }

    /// Applies the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database schema is up to date");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn gallery(&self) -> &PostgresGalleryRepository {
        &self.gallery
    }

    pub fn contacts(&self) -> &PostgresContactRepository {
        &self.contacts
    }

    pub fn recipients(&self) -> &PostgresEmailRecipientRepository {
        &self.recipients
    }
}
