use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use phenix_config::Config;
use phenix_core::{
    auth::AuthCrypto,
    database::{DatabaseContext, InMemoryDatabase, seed},
    mail::{HttpMailer, Mailer, SimulatedMailer},
    storage::{BlobStore, HttpBlobStore, UnconfiguredBlobStore},
};
use tracing::{debug, info, warn};

use crate::infra::app_state::AppState;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

pub fn build_crypto(config: &Config) -> Result<AuthCrypto> {
    AuthCrypto::new(&config.auth.password_pepper, &config.auth.token_key)
        .context("failed to initialise authentication crypto")
}

/// Demo mode, or a missing database URL, runs on a seeded in-memory store.
pub async fn connect_database(config: &Config) -> Result<DatabaseContext> {
    match (&config.database.url, config.site.demo) {
        (Some(url), false) => {
            let db = DatabaseContext::connect_postgres(
                url,
                config.database.max_connections,
            )
            .await
            .context("failed to connect to PostgreSQL")?;
            if let Some(pg) = db.postgres() {
                pg.initialize_schema()
                    .await
                    .context("database migration failed")?;
            }
            Ok(db)
        }
        (url, demo) => {
            if url.is_none() && !demo {
                warn!("no database configured; using the in-memory store");
            }
            let db = DatabaseContext::in_memory(InMemoryDatabase::new());
            let report = seed::seed_database(&db)
                .await
                .context("failed to seed the in-memory store")?;
            info!(inserted = report.inserted, "in-memory store seeded");
            Ok(db)
        }
    }
}

pub fn build_mailer(config: &Config) -> Result<Arc<dyn Mailer>> {
    Ok(match &config.mail.api {
        Some(api) => Arc::new(
            HttpMailer::new(&api.url, &api.key)
                .context("failed to build mail client")?,
        ),
        None => Arc::new(SimulatedMailer),
    })
}

pub fn build_blob_store(config: &Config) -> Result<Arc<dyn BlobStore>> {
    Ok(match (&config.storage.api_url, &config.storage.token) {
        (Some(url), Some(token)) => Arc::new(
            HttpBlobStore::new(url, token)
                .context("failed to build blob storage client")?,
        ),
        _ => Arc::new(UnconfiguredBlobStore),
    })
}

pub async fn build_state(config: Arc<Config>) -> Result<AppState> {
    let crypto = Arc::new(build_crypto(&config)?);
    let db = connect_database(&config).await?;
    let mailer = build_mailer(&config)?;
    let blobs = build_blob_store(&config)?;

    info!(
        backend = db.backend_name(),
        mailer = mailer.name(),
        "application state ready"
    );
    Ok(AppState::new(config, db, crypto, mailer, blobs))
}

pub fn spawn_session_cleanup(state: &AppState) {
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                let active = sessions.len().await;
                debug!(removed, active, "session sweep");
            }
        }
    });
}
