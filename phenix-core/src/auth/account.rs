use tracing::warn;

use super::crypto::{AuthCrypto, AuthCryptoError};

/// The single administrator configured for the site.
#[derive(Clone)]
pub struct AdminAccount {
    username: String,
    password_hash: Option<String>,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("password_configured", &self.password_hash.is_some())
            .finish()
    }
}

impl AdminAccount {
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Always false when no password hash is configured.
    pub fn verify(
        &self,
        crypto: &AuthCrypto,
        username: &str,
        password: &str,
    ) -> Result<bool, AuthCryptoError> {
        let Some(hash) = self.password_hash.as_deref() else {
            warn!("admin login attempted but no password hash is configured");
            return Ok(false);
        };
        let password_ok = crypto.verify_password(password, hash)?;
        Ok(password_ok && username == self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::fast_crypto;

    #[test]
    fn verifies_username_and_password() {
        let crypto = fast_crypto();
        let hash = crypto.hash_password("enclume").unwrap();
        let account = AdminAccount::new("admin", Some(hash));

        assert!(account.verify(&crypto, "admin", "enclume").unwrap());
        assert!(!account.verify(&crypto, "root", "enclume").unwrap());
        assert!(!account.verify(&crypto, "admin", "marteau").unwrap());
    }

    #[test]
    fn unconfigured_account_never_authenticates() {
        let crypto = fast_crypto();
        let account = AdminAccount::new("admin", None);
        assert!(!account.verify(&crypto, "admin", "").unwrap());
    }
}
