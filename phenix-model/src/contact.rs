use chrono::{DateTime, Utc};

/// A persisted contact-form submission.
///
/// Serialized with the French keys the admin panel reads (`nom`,
/// `telephone`, `sujet`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContactMessage {
    pub id: i32,
    #[cfg_attr(feature = "serde", serde(rename = "nom"))]
    pub name: String,
    pub email: String,
    #[cfg_attr(feature = "serde", serde(rename = "telephone"))]
    pub phone: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "sujet"))]
    pub subject: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated submission ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl NewContactMessage {
    /// Trims every field, lower-cases the email and drops a blank phone.
    pub fn normalized(
        name: &str,
        email: &str,
        phone: Option<&str>,
        subject: &str,
        message: &str,
        ip_address: impl Into<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
            ip_address: ip_address.into(),
            user_agent,
        }
    }
}

/// Destination address for contact notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EmailRecipient {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
