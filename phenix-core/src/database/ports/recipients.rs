use async_trait::async_trait;
use phenix_model::EmailRecipient;

use crate::error::Result;

#[async_trait]
pub trait EmailRecipientRepository: Send + Sync {
    /// Most recently created active recipient, if any.
    async fn active_recipient(&self) -> Result<Option<EmailRecipient>>;

    /// Creates an active recipient unless one already exists. Returns the
    /// recipient that is in place afterwards.
    async fn ensure_default(&self, email: &str) -> Result<EmailRecipient>;
}
