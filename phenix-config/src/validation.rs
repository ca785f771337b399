use crate::constants::MIN_SECRET_LENGTH;
use crate::models::Config;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn mentions(&self, needle: &str) -> bool {
        self.items.iter().any(|item| item.message.contains(needle))
    }
}

/// Non-fatal problems worth reporting at startup.
pub fn collect_warnings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.auth.is_default_pepper() {
        warnings.push_with_hint(
            "AUTH_PASSWORD_PEPPER uses the default placeholder value",
            "Generate a random secret and set AUTH_PASSWORD_PEPPER",
        );
    } else if config.auth.password_pepper.len() < MIN_SECRET_LENGTH {
        warnings.push(format!(
            "AUTH_PASSWORD_PEPPER is shorter than {MIN_SECRET_LENGTH} characters"
        ));
    }

    if config.auth.is_default_token_key() {
        warnings.push_with_hint(
            "AUTH_TOKEN_KEY uses the default placeholder value",
            "Generate a random secret and set AUTH_TOKEN_KEY",
        );
    } else if config.auth.token_key.len() < MIN_SECRET_LENGTH {
        warnings.push(format!(
            "AUTH_TOKEN_KEY is shorter than {MIN_SECRET_LENGTH} characters"
        ));
    }

    if config.auth.admin_password_hash.is_none() {
        warnings.push_with_hint(
            "ADMIN_PASSWORD_HASH not set; the admin panel cannot be unlocked",
            "Run `phenix-server hash-password <password>` and store the result",
        );
    }

    if config.database.url.is_none() && !config.site.demo {
        warnings.push_with_hint(
            "DATABASE_URL not configured; serving from the in-memory store",
            "Set DATABASE_URL to persist gallery entries and messages",
        );
    }

    if config.mail.api.is_none() {
        warnings.push(
            "Mail API not configured; contact notifications are only logged",
        );
    }

    if !config.storage.is_configured() {
        warnings.push(
            "Blob storage not configured; image uploads will be rejected",
        );
    }

    if !config.site.public_dir.exists() {
        warnings.push(format!(
            "public directory {} does not exist",
            config.site.public_dir.display()
        ));
    }

    warnings
}
