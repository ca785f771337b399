use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use super::{DeliveryReceipt, EmailMessage, MailError, Mailer};

/// Logs the message instead of delivering it. Used when no mail API is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedMailer;

#[async_trait]
impl Mailer for SimulatedMailer {
    async fn send(
        &self,
        message: EmailMessage,
    ) -> Result<DeliveryReceipt, MailError> {
        warn!(
            to = %message.to,
            subject = %message.subject,
            "mail API not configured, simulating delivery"
        );
        debug!(body = %message.text, "simulated email");
        Ok(DeliveryReceipt {
            id: format!("simulated-{}", Utc::now().timestamp_millis()),
        })
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_simulated_receipt() {
        let receipt = SimulatedMailer
            .send(EmailMessage {
                to: "atelier@example.fr".into(),
                from: "site@example.fr".into(),
                reply_to: None,
                subject: "Test".into(),
                html: "<p>Test</p>".into(),
                text: "Test".into(),
            })
            .await
            .expect("simulated send");
        assert!(receipt.id.starts_with("simulated-"));
        assert!(receipt.id["simulated-".len()..].parse::<i64>().is_ok());
    }
}
