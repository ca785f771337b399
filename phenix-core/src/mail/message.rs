use chrono::{DateTime, Utc};
use phenix_model::ContactMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub id: String,
}

const SITE_NAME: &str = "Phenix Ferronnerie";

/// Notification sent to the workshop for each stored contact submission.
#[derive(Debug, Clone, Copy)]
pub struct ContactNotification<'a> {
    contact: &'a ContactMessage,
    received_at: DateTime<Utc>,
}

impl<'a> ContactNotification<'a> {
    pub fn new(contact: &'a ContactMessage, received_at: DateTime<Utc>) -> Self {
        Self {
            contact,
            received_at,
        }
    }

    pub fn subject(&self) -> String {
        format!("Nouveau message de contact - {}", self.contact.subject)
    }

    fn received_label(&self) -> String {
        self.received_at.format("%d/%m/%Y %H:%M:%S").to_string()
    }

    pub fn html(&self) -> String {
        let c = self.contact;
        let email = escape_html(&c.email);
        let phone = c
            .phone
            .as_deref()
            .map(|phone| {
                let phone = escape_html(phone);
                format!(
                    r#"
      <div class="field">
        <div class="label">Téléphone:</div>
        <div class="value"><a href="tel:{phone}">{phone}</a></div>
      </div>"#
                )
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Nouveau message de contact</title>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: #1a1a1a; color: #fff; padding: 20px; text-align: center; }}
    .content {{ background: #f9f9f9; padding: 20px; }}
    .field {{ margin-bottom: 15px; }}
    .label {{ font-weight: bold; color: #555; }}
    .message-box {{ background: #fff; padding: 15px; border-left: 4px solid #ff6b35; margin: 15px 0; }}
    .footer {{ background: #333; color: #fff; padding: 15px; text-align: center; font-size: 12px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{site}</h1>
      <h2>Nouveau message de contact</h2>
    </div>
    <div class="content">
      <div class="field">
        <div class="label">Nom:</div>
        <div class="value">{name}</div>
      </div>
      <div class="field">
        <div class="label">Email:</div>
        <div class="value"><a href="mailto:{email}">{email}</a></div>
      </div>{phone}
      <div class="field">
        <div class="label">Sujet:</div>
        <div class="value">{subject}</div>
      </div>
      <div class="field">
        <div class="label">Message:</div>
        <div class="message-box">{message}</div>
      </div>
    </div>
    <div class="footer">
      <p>Message reçu le {received}</p>
      <p>IP: {ip} | ID: {id}</p>
      <p>Envoyé depuis le site web {site}</p>
    </div>
  </div>
</body>
</html>
"#,
            site = SITE_NAME,
            name = escape_html(&c.name),
            subject = escape_html(&c.subject),
            message = escape_html(&c.message).replace('\n', "<br>"),
            received = self.received_label(),
            ip = escape_html(&c.ip_address),
            id = c.id,
        )
    }

    pub fn text(&self) -> String {
        let c = self.contact;
        let mut lines = vec![
            format!("NOUVEAU MESSAGE DE CONTACT - {SITE_NAME}"),
            String::new(),
            format!("Nom: {}", c.name),
            format!("Email: {}", c.email),
        ];
        if let Some(phone) = &c.phone {
            lines.push(format!("Téléphone: {phone}"));
        }
        lines.extend([
            format!("Sujet: {}", c.subject),
            String::new(),
            "Message:".to_string(),
            c.message.clone(),
            String::new(),
            "---".to_string(),
            format!("Message reçu le {}", self.received_label()),
            format!("IP: {}", c.ip_address),
            format!("ID du contact: {}", c.id),
            format!("Envoyé depuis le site web {SITE_NAME}"),
        ]);
        lines.join("\n")
    }

    /// Replies from the mailbox go straight to the visitor.
    pub fn into_email(self, to: &str, from: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            from: from.to_string(),
            reply_to: Some(self.contact.email.clone()),
            subject: self.subject(),
            html: self.html(),
            text: self.text(),
        }
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contact(phone: Option<&str>) -> ContactMessage {
        ContactMessage {
            id: 42,
            name: "Jeanne <Dupont>".into(),
            email: "jeanne@example.fr".into(),
            phone: phone.map(str::to_string),
            subject: "Portail sur mesure".into(),
            message: "Bonjour,\nje souhaite un devis.".into(),
            ip_address: "203.0.113.7".into(),
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    fn received() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn html_escapes_values_and_breaks_lines() {
        let contact = contact(Some("06 12 34 56 78"));
        let html = ContactNotification::new(&contact, received()).html();

        assert!(html.contains("Jeanne &lt;Dupont&gt;"));
        assert!(html.contains("Bonjour,<br>je souhaite un devis."));
        assert!(html.contains("tel:06 12 34 56 78"));
        assert!(html.contains("Message reçu le 14/03/2025 09:30:00"));
        assert!(html.contains("IP: 203.0.113.7 | ID: 42"));
    }

    #[test]
    fn text_omits_missing_phone() {
        let contact = contact(None);
        let text = ContactNotification::new(&contact, received()).text();

        assert!(text.starts_with("NOUVEAU MESSAGE DE CONTACT - Phenix Ferronnerie"));
        assert!(!text.contains("Téléphone"));
        assert!(text.contains("ID du contact: 42"));
    }

    #[test]
    fn email_targets_recipient_and_replies_to_visitor() {
        let contact = contact(None);
        let email = ContactNotification::new(&contact, received())
            .into_email("atelier@example.fr", "site@example.fr");

        assert_eq!(email.subject, "Nouveau message de contact - Portail sur mesure");
        assert_eq!(email.to, "atelier@example.fr");
        assert_eq!(email.reply_to.as_deref(), Some("jeanne@example.fr"));
    }
}
