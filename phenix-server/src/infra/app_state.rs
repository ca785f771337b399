use std::{fmt, sync::Arc};

use phenix_config::Config;
use phenix_core::{
    auth::{AdminAccount, AuthCrypto, SessionStore},
    database::DatabaseContext,
    mail::Mailer,
    storage::BlobStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseContext,
    pub crypto: Arc<AuthCrypto>,
    pub sessions: SessionStore,
    pub admin: Arc<AdminAccount>,
    pub mailer: Arc<dyn Mailer>,
    pub blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("mailer", &self.mailer.name())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the admin account and session store from `config.auth`.
    pub fn new(
        config: Arc<Config>,
        db: DatabaseContext,
        crypto: Arc<AuthCrypto>,
        mailer: Arc<dyn Mailer>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let sessions =
            SessionStore::new(Arc::clone(&crypto), config.auth.session_ttl);
        let admin = Arc::new(AdminAccount::new(
            config.auth.admin_username.clone(),
            config.auth.admin_password_hash.clone(),
        ));
        Self {
            config,
            db,
            crypto,
            sessions,
            admin,
            mailer,
            blobs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
