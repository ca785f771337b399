use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    #[serde(default)]
    pub mail: FileMailConfig,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub site: FileSiteConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_proxy_headers: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_pepper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_key: Option<String>,
    /// Human readable duration, e.g. `"24h"` or `"90m"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_ttl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileMailConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileStorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSiteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wasm_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<bool>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub trust_proxy_headers: Option<bool>,
    pub database_url: Option<String>,
    pub database_password: Option<String>,
    pub database_password_file: Option<PathBuf>,
    pub database_max_connections: Option<u32>,
    pub admin_username: Option<String>,
    pub admin_password_hash: Option<String>,
    pub auth_password_pepper: Option<String>,
    pub auth_token_key: Option<String>,
    pub session_ttl: Option<String>,
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub mail_from: Option<String>,
    pub storage_api_url: Option<String>,
    pub storage_token: Option<String>,
    pub public_dir: Option<PathBuf>,
    pub wasm_dir: Option<PathBuf>,
    pub demo: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: path_var("PHENIX_CONFIG"),
            server_host: string_var("SERVER_HOST"),
            server_port: parsed_var("SERVER_PORT"),
            trust_proxy_headers: parse_bool_var("TRUST_PROXY_HEADERS"),
            database_url: string_var("DATABASE_URL"),
            database_password: string_var("DATABASE_PASSWORD"),
            database_password_file: path_var("DATABASE_PASSWORD_FILE"),
            database_max_connections: parsed_var("DATABASE_MAX_CONNECTIONS"),
            admin_username: string_var("ADMIN_USERNAME"),
            admin_password_hash: string_var("ADMIN_PASSWORD_HASH"),
            auth_password_pepper: string_var("AUTH_PASSWORD_PEPPER"),
            auth_token_key: string_var("AUTH_TOKEN_KEY"),
            session_ttl: string_var("SESSION_TTL"),
            mail_api_url: string_var("MAIL_API_URL"),
            mail_api_key: string_var("MAIL_API_KEY"),
            mail_from: string_var("MAIL_FROM"),
            storage_api_url: string_var("STORAGE_API_URL"),
            storage_token: string_var("STORAGE_TOKEN"),
            public_dir: path_var("PUBLIC_DIR"),
            wasm_dir: path_var("WASM_DIR"),
            demo: parse_bool_var("DEMO_MODE"),
        }
    }
}

/// Unset and blank variables are both treated as absent.
fn string_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn path_var(name: &str) -> Option<PathBuf> {
    string_var(name).map(PathBuf::from)
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    string_var(name).and_then(|raw| raw.trim().parse().ok())
}

fn parse_bool_var(name: &str) -> Option<bool> {
    string_var(name).and_then(|raw| {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    })
}
