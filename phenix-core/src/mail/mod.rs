//! Outbound notification email.

pub mod error;
pub mod http;
pub mod message;
pub mod simulated;

use async_trait::async_trait;

pub use error::MailError;
pub use http::HttpMailer;
pub use message::{ContactNotification, DeliveryReceipt, EmailMessage};
pub use simulated::SimulatedMailer;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        message: EmailMessage,
    ) -> Result<DeliveryReceipt, MailError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
