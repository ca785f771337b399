use std::fmt;
use std::sync::Arc;

use crate::database::memory::InMemoryDatabase;
use crate::database::ports::{
    ContactRepository, EmailRecipientRepository, GalleryRepository,
};
use crate::database::postgres::PostgresDatabase;
use crate::error::Result;

/// Bundles the repository ports so handlers depend on traits rather than a
/// concrete backend.
#[derive(Clone)]
pub struct DatabaseContext {
    gallery: Arc<dyn GalleryRepository>,
    contacts: Arc<dyn ContactRepository>,
    recipients: Arc<dyn EmailRecipientRepository>,
    postgres: Option<Arc<PostgresDatabase>>,
}

impl fmt::Debug for DatabaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseContext")
            .field("backend", &self.backend_name())
            .finish_non_exhaustive()
    }
}

impl DatabaseContext {
    /// Connect to PostgreSQL and wire its repositories.
    pub async fn connect_postgres(
        connection_string: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let postgres = Arc::new(
            PostgresDatabase::connect(connection_string, max_connections)
                .await?,
        );
        Ok(Self::from_postgres(postgres))
    }

    pub fn from_postgres(postgres: Arc<PostgresDatabase>) -> Self {
        Self {
            gallery: Arc::new(postgres.gallery().clone()),
            contacts: Arc::new(postgres.contacts().clone()),
            recipients: Arc::new(postgres.recipients().clone()),
            postgres: Some(postgres),
        }
    }

    pub fn in_memory(memory: InMemoryDatabase) -> Self {
        Self {
            gallery: Arc::new(memory.clone()),
            contacts: Arc::new(memory.clone()),
            recipients: Arc::new(memory),
            postgres: None,
        }
    }

    pub fn gallery(&self) -> Arc<dyn GalleryRepository> {
        Arc::clone(&self.gallery)
    }

    pub fn contacts(&self) -> Arc<dyn ContactRepository> {
        Arc::clone(&self.contacts)
    }

    pub fn recipients(&self) -> Arc<dyn EmailRecipientRepository> {
        Arc::clone(&self.recipients)
    }

    pub fn postgres(&self) -> Option<Arc<PostgresDatabase>> {
        self.postgres.clone()
    }

    pub fn backend_name(&self) -> &'static str {
        if self.postgres.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
