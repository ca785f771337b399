//! Configuration for the Phenix website.
//!
//! Values are layered: an optional `.env` file, an optional TOML file, then
//! environment variables, with defaults from [`constants`]. Problems that do
//! not prevent startup are returned as [`ConfigWarnings`] for the caller to
//! log.

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    AuthConfig, Config, ConfigMetadata, DatabaseConfig, MailApiConfig,
    MailConfig, ServerConfig, SiteConfig, StorageConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
