use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_ADMIN_USERNAME, DEFAULT_HOST, DEFAULT_MAIL_FROM,
    DEFAULT_PASSWORD_PEPPER, DEFAULT_PORT, DEFAULT_PUBLIC_DIR,
    DEFAULT_SESSION_TTL, DEFAULT_TOKEN_KEY, DEFAULT_WASM_DIR,
};
use crate::models::{
    AuthConfig, Config, ConfigMetadata, DatabaseConfig, MailApiConfig,
    MailConfig, ServerConfig, SiteConfig, StorageConfig,
    sources::{EnvConfig, FileConfig, FileDatabaseConfig},
};
use crate::validation::{self, ConfigWarnings};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("phenix.toml"),
        PathBuf::from("config/phenix.toml"),
    ]
});

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Use these values instead of reading `.env` and the process
    /// environment.
    pub env: Option<EnvConfig>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.options.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (env_config, env_file_loaded) = match &self.options.env {
            Some(env) => (env.clone(), false),
            None => {
                let loaded = self.load_env_file()?;
                (EnvConfig::gather(), loaded)
            }
        };

        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No phenix.toml detected; falling back to environment variables",
                "Copy phenix.example.toml to phenix.toml to customise the site",
            );
        }

        let config = compose_config(
            file_config.unwrap_or_default(),
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;
        warnings.extend(validation::collect_warnings(&config));

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<Config, ConfigLoadError> {
    let FileConfig {
        server: file_server,
        database: file_database,
        auth: file_auth,
        mail: file_mail,
        storage: file_storage,
        site: file_site,
    } = file;

    let server = ServerConfig {
        host: env
            .server_host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        trust_proxy_headers: env
            .trust_proxy_headers
            .or(file_server.trust_proxy_headers)
            .unwrap_or(true),
    };

    let database = DatabaseConfig {
        url: resolve_database_url(&env, &file_database)?,
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let session_ttl_raw = env
        .session_ttl
        .clone()
        .or(file_auth.session_ttl)
        .unwrap_or_else(|| DEFAULT_SESSION_TTL.to_string());
    let auth = AuthConfig {
        admin_username: env
            .admin_username
            .clone()
            .or(file_auth.admin_username)
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string()),
        admin_password_hash: env
            .admin_password_hash
            .clone()
            .or(file_auth.admin_password_hash)
            .filter(|hash| !hash.trim().is_empty()),
        password_pepper: env
            .auth_password_pepper
            .clone()
            .or(file_auth.password_pepper)
            .unwrap_or_else(|| DEFAULT_PASSWORD_PEPPER.to_string()),
        token_key: env
            .auth_token_key
            .clone()
            .or(file_auth.token_key)
            .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string()),
        session_ttl: parse_duration("auth.session_ttl", &session_ttl_raw)?,
    };

    let mail_url = env.mail_api_url.clone().or(file_mail.api_url);
    let mail_key = env.mail_api_key.clone().or(file_mail.api_key);
    let mail = MailConfig {
        api: match (mail_url, mail_key) {
            (Some(url), Some(key)) => Some(MailApiConfig {
                url: validate_url("mail.api_url", url)?,
                key,
            }),
            _ => None,
        },
        from: env
            .mail_from
            .clone()
            .or(file_mail.from)
            .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
    };

    let storage = StorageConfig {
        api_url: env
            .storage_api_url
            .clone()
            .or(file_storage.api_url)
            .map(|url| validate_url("storage.api_url", url))
            .transpose()?,
        token: env.storage_token.clone().or(file_storage.token),
    };

    let site = SiteConfig {
        public_dir: env
            .public_dir
            .clone()
            .or(file_site.public_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
        wasm_dir: env
            .wasm_dir
            .clone()
            .or(file_site.wasm_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WASM_DIR)),
        demo: env.demo.or(file_site.demo).unwrap_or(false),
    };

    Ok(Config {
        server,
        database,
        auth,
        mail,
        storage,
        site,
        metadata,
    })
}

fn parse_duration(
    field: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    let duration = humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            field,
            value: raw.to_string(),
            source,
        }
    })?;
    if duration.is_zero() {
        return Err(ConfigLoadError::InvalidValue {
            field,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(duration)
}

fn validate_url(
    field: &'static str,
    raw: String,
) -> Result<String, ConfigLoadError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|source| ConfigLoadError::InvalidUrl { field, source })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigLoadError::InvalidValue {
            field,
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

fn resolve_database_url(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<String>, ConfigLoadError> {
    if let Some(url) = env.database_url.clone() {
        return Ok(Some(url));
    }

    let Some(stored_url) = file_database.url.as_deref() else {
        return Ok(None);
    };
    let trimmed = stored_url.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut parsed = Url::parse(trimmed).map_err(|source| {
        ConfigLoadError::InvalidUrl {
            field: "database.url",
            source,
        }
    })?;
    if parsed.password().is_none()
        && let Some(password) = resolve_database_password(env, file_database)?
    {
        parsed
            .set_password(Some(&password))
            .map_err(|_| ConfigLoadError::InvalidDatabasePassword)?;
    }
    Ok(Some(parsed.to_string()))
}

fn resolve_database_password(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<String>, ConfigLoadError> {
    if let Some(password) = env.database_password.clone() {
        return Ok(Some(password));
    }

    for path in [
        env.database_password_file.as_ref(),
        file_database.password_file.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(secret) = read_secret_file(path)? {
            return Ok(Some(secret));
        }
    }

    Ok(None)
}

fn read_secret_file(path: &Path) -> Result<Option<String>, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::SecretFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid URL for {field}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid duration `{value}` for {field}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("failed to encode database password into URL")]
    InvalidDatabasePassword,
    #[error("failed to read secret file {path}")]
    SecretFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
