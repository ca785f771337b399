pub mod sources;

use crate::constants::{DEFAULT_PASSWORD_PEPPER, DEFAULT_TOKEN_KEY};

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
    pub site: SiteConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Honour `x-forwarded-for` / `x-real-ip` when recording client IPs.
    pub trust_proxy_headers: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub admin_username: String,
    /// Argon2 PHC string; login is refused while unset.
    pub admin_password_hash: Option<String>,
    pub password_pepper: String,
    pub token_key: String,
    pub session_ttl: Duration,
}

impl AuthConfig {
    pub fn is_default_pepper(&self) -> bool {
        self.password_pepper == DEFAULT_PASSWORD_PEPPER
    }

    pub fn is_default_token_key(&self) -> bool {
        self.token_key == DEFAULT_TOKEN_KEY
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password_hash",
                &self.admin_password_hash.as_ref().map(|_| "<redacted>"),
            )
            .field("password_pepper", &"<redacted>")
            .field("token_key", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

/// Transactional mail API. `None` means messages are only logged.
#[derive(Clone)]
pub struct MailConfig {
    pub api: Option<MailApiConfig>,
    pub from: String,
}

#[derive(Clone)]
pub struct MailApiConfig {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api.as_ref().map(|api| api.url.as_str()))
            .field("from", &self.from)
            .finish()
    }
}

impl std::fmt::Debug for MailApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailApiConfig")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct StorageConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
}

impl StorageConfig {
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.token.is_some()
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub public_dir: PathBuf,
    /// Output directory of the carousel's wasm-pack build, served at `/pkg`.
    pub wasm_dir: PathBuf,
    /// Run against the in-memory store with seeded entries.
    pub demo: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
