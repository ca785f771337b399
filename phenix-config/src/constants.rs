/// Placeholder pepper used when none is configured. Startup warns about it.
pub const DEFAULT_PASSWORD_PEPPER: &str = "phenix-dev-password-pepper-change-me";
pub const DEFAULT_TOKEN_KEY: &str = "phenix-dev-session-token-key-change-me";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_SESSION_TTL: &str = "24h";
pub const DEFAULT_MAIL_FROM: &str = "Phenix Ferronnerie <noreply@phenix-ferronnerie.fr>";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_WASM_DIR: &str = "phenix-carousel/pkg";

/// Secrets shorter than this are reported.
pub const MIN_SECRET_LENGTH: usize = 32;
