use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::crypto::{AuthCrypto, AuthCryptoError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Raw token handed to the client plus the session it unlocks.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

/// Admin sessions keyed by the HMAC of their token. Raw tokens never stay in
/// memory past `create`.
#[derive(Clone)]
pub struct SessionStore {
    crypto: Arc<AuthCrypto>,
    ttl: TimeDelta,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(crypto: Arc<AuthCrypto>, ttl: Duration) -> Self {
        let ttl = TimeDelta::from_std(ttl)
            .unwrap_or_else(|_| TimeDelta::hours(24));
        Self {
            crypto,
            ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create(
        &self,
        username: &str,
    ) -> Result<IssuedSession, AuthCryptoError> {
        let token = self.crypto.generate_token()?;
        let now = Utc::now();
        let session = Session {
            username: username.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .lock()
            .await
            .insert(self.crypto.hash_token(&token), session.clone());
        info!(username, expires_at = %session.expires_at, "admin session created");

        Ok(IssuedSession { token, session })
    }

    /// Returns the live session for `token`, dropping it if it has expired.
    pub async fn validate(&self, token: &str) -> Option<Session> {
        let key = self.crypto.hash_token(token);
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&key) {
            Some(session) if session.is_valid_at(Utc::now()) => {
                Some(session.clone())
            }
            Some(_) => {
                sessions.remove(&key);
                debug!("expired admin session rejected");
                None
            }
            None => None,
        }
    }

    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => self.validate(token).await.is_some(),
            None => false,
        }
    }

    pub async fn revoke(&self, token: &str) -> bool {
        let key = self.crypto.hash_token(token);
        let removed = self.sessions.lock().await.remove(&key).is_some();
        if removed {
            info!("admin session revoked");
        }
        removed
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        let initial = sessions.len();
        sessions.retain(|_, session| session.is_valid_at(now));
        let removed = initial - sessions.len();
        if removed > 0 {
            info!(removed, "cleaned up expired admin sessions");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::fast_crypto;

    fn store(ttl: Duration) -> SessionStore {
        SessionStore::new(Arc::new(fast_crypto()), ttl)
    }

    #[tokio::test]
    async fn created_sessions_validate_until_revoked() {
        let store = store(SessionStore::DEFAULT_TTL);
        let issued = store.create("admin").await.unwrap();

        let session = store.validate(&issued.token).await.expect("valid");
        assert_eq!(session.username, "admin");
        assert_eq!(session.expires_at - session.created_at, TimeDelta::hours(24));

        assert!(store.revoke(&issued.token).await);
        assert!(store.validate(&issued.token).await.is_none());
        assert!(!store.revoke(&issued.token).await);
    }

    #[tokio::test]
    async fn unknown_or_missing_tokens_are_rejected() {
        let store = store(SessionStore::DEFAULT_TTL);
        assert!(!store.is_authenticated(None).await);
        assert!(!store.is_authenticated(Some("forged")).await);
    }

    #[tokio::test]
    async fn expired_sessions_are_purged() {
        let store = store(Duration::ZERO);
        let issued = store.create("admin").await.unwrap();
        store.create("admin").await.unwrap();

        assert!(store.validate(&issued.token).await.is_none());
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 0);
    }
}
