use async_trait::async_trait;
use phenix_model::{ContactMessage, NewContactMessage};

use crate::error::Result;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: NewContactMessage) -> Result<ContactMessage>;

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>>;
}
