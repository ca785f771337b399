use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[0-9\s\-()]{10,}$").expect("valid phone regex"));

const BOT_PATTERNS: [&str; 8] = [
    "bot", "crawler", "spider", "scraper", "curl", "wget", "python", "java",
];

/// Raw contact form payload, keyed the way the public form posts it.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub sujet: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "csrfToken")]
    pub csrf_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRejection {
    MissingFields,
    NameLength,
    SubjectLength,
    MessageLength,
    InvalidEmail,
    InvalidPhone,
    MissingCsrfToken,
}

impl ContactRejection {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "Tous les champs obligatoires doivent être remplis",
            Self::NameLength => "Le nom doit contenir entre 2 et 100 caractères",
            Self::SubjectLength => "Le sujet doit contenir entre 5 et 200 caractères",
            Self::MessageLength => "Le message doit contenir entre 10 et 2000 caractères",
            Self::InvalidEmail => "Adresse email invalide",
            Self::InvalidPhone => "Numéro de téléphone invalide",
            Self::MissingCsrfToken => "Token de sécurité manquant",
        }
    }
}

/// Borrowed view of a form that passed every check.
#[derive(Debug, Clone, Copy)]
pub struct ValidContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub subject: &'a str,
    pub message: &'a str,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Lengths are UTF-16 code units, the unit browsers use for `minlength`
/// and `maxlength` on the form.
fn length_within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.encode_utf16().count())
}

impl ContactForm {
    /// Checks run in a fixed order and the first failure is reported.
    pub fn validate(&self) -> Result<ValidContact<'_>, ContactRejection> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            present(&self.nom),
            present(&self.email),
            present(&self.sujet),
            present(&self.message),
        ) else {
            return Err(ContactRejection::MissingFields);
        };

        if !length_within(name, 2, 100) {
            return Err(ContactRejection::NameLength);
        }
        if !length_within(subject, 5, 200) {
            return Err(ContactRejection::SubjectLength);
        }
        if !length_within(message, 10, 2000) {
            return Err(ContactRejection::MessageLength);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ContactRejection::InvalidEmail);
        }
        let phone = present(&self.telephone);
        if let Some(phone) = phone
            && !PHONE_RE.is_match(phone)
        {
            return Err(ContactRejection::InvalidPhone);
        }
        if present(&self.csrf_token).is_none() {
            return Err(ContactRejection::MissingCsrfToken);
        }

        Ok(ValidContact {
            name,
            email,
            phone,
            subject,
            message,
        })
    }
}

/// Missing user agents count as bots.
pub fn is_bot(user_agent: Option<&str>) -> bool {
    let Some(agent) = user_agent else {
        return true;
    };
    let agent = agent.to_lowercase();
    BOT_PATTERNS.iter().any(|pattern| agent.contains(pattern))
}
