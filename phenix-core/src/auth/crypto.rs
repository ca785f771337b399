use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use password_hash::Error as PasswordHashError;
use rand::{TryRngCore, rngs::OsRng};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Argon2id password hashing with a server-side pepper, and HMAC-SHA-256
/// hashing of session tokens before they are kept in memory.
pub struct AuthCrypto {
    argon2: Argon2<'static>,
    password_pepper: Zeroizing<Vec<u8>>,
    token_mac: HmacSha256,
}

impl fmt::Debug for AuthCrypto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCrypto")
            .field("argon2", &self.argon2)
            .field("password_pepper", &"<redacted>")
            .field("token_mac", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthCryptoError {
    #[error("password pepper must not be empty")]
    EmptyPasswordPepper,
    #[error("token HMAC key must not be empty")]
    EmptyTokenKey,
    #[error("invalid token HMAC key: {0}")]
    InvalidTokenKey(String),
    #[error("invalid Argon2 parameters: {0}")]
    InvalidArgon2Params(String),
    #[error("password hashing error: {0}")]
    PasswordHash(String),
    #[error("random source unavailable: {0}")]
    Random(String),
}

impl From<PasswordHashError> for AuthCryptoError {
    fn from(err: PasswordHashError) -> Self {
        AuthCryptoError::PasswordHash(err.to_string())
    }
}

impl AuthCrypto {
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;
    const TOKEN_BYTES: usize = 32;

    /// Build a helper with default Argon2id parameters.
    pub fn new(
        password_pepper: impl AsRef<[u8]>,
        token_hmac_key: impl AsRef<[u8]>,
    ) -> Result<Self, AuthCryptoError> {
        Self::with_params(
            password_pepper,
            token_hmac_key,
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| {
                    AuthCryptoError::InvalidArgon2Params(err.to_string())
                })?,
        )
    }

    /// Build a helper with caller-specified Argon2 parameters.
    pub fn with_params(
        password_pepper: impl AsRef<[u8]>,
        token_hmac_key: impl AsRef<[u8]>,
        params: Params,
    ) -> Result<Self, AuthCryptoError> {
        let pepper = password_pepper.as_ref();
        if pepper.is_empty() {
            return Err(AuthCryptoError::EmptyPasswordPepper);
        }

        let key = token_hmac_key.as_ref();
        if key.is_empty() {
            return Err(AuthCryptoError::EmptyTokenKey);
        }
        let token_mac = HmacSha256::new_from_slice(key)
            .map_err(|err| AuthCryptoError::InvalidTokenKey(err.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::default(), params),
            password_pepper: Zeroizing::new(pepper.to_vec()),
            token_mac,
        })
    }

    fn peppered(&self, password: &str) -> Zeroizing<Vec<u8>> {
        let mut material = Zeroizing::new(Vec::with_capacity(
            password.len() + self.password_pepper.len(),
        ));
        material.extend_from_slice(password.as_bytes());
        material.extend_from_slice(&self.password_pepper);
        material
    }

    /// Hash a password into a PHC string suitable for the config file.
    pub fn hash_password(
        &self,
        password: &str,
    ) -> Result<String, AuthCryptoError> {
        let material = self.peppered(password);

        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| AuthCryptoError::Random(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;
        let hash = self.argon2.hash_password(&material, &salt)?.to_string();
        Ok(hash)
    }

    /// Verify a password against a stored PHC string.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthCryptoError> {
        let parsed = PasswordHash::new(password_hash)?;
        let material = self.peppered(password);
        Ok(self.argon2.verify_password(&material, &parsed).is_ok())
    }

    /// Hex HMAC-SHA-256 digest of an opaque token.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = self.token_mac.clone();
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// 256 random bits, URL-safe base64 without padding.
    pub fn generate_token(&self) -> Result<String, AuthCryptoError> {
        let mut bytes = Zeroizing::new([0u8; Self::TOKEN_BYTES]);
        OsRng
            .try_fill_bytes(&mut bytes[..])
            .map_err(|err| AuthCryptoError::Random(err.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(&bytes[..]))
    }
}

#[cfg(test)]
pub(crate) fn fast_crypto() -> AuthCrypto {
    let params = Params::new(8, 1, 1, Some(32)).expect("params");
    AuthCrypto::with_params("test-pepper", "test-token-key", params)
        .expect("crypto")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_passwords_and_verifies() {
        let crypto = fast_crypto();
        let hash = crypto.hash_password("forge et enclume").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(crypto.verify_password("forge et enclume", &hash).unwrap());
        assert!(!crypto.verify_password("marteau", &hash).unwrap());
    }

    #[test]
    fn pepper_is_part_of_the_hash() {
        let crypto = fast_crypto();
        let hash = crypto.hash_password("secret").unwrap();

        let params = Params::new(8, 1, 1, Some(32)).unwrap();
        let other =
            AuthCrypto::with_params("other-pepper", "test-token-key", params)
                .unwrap();
        assert!(!other.verify_password("secret", &hash).unwrap());
    }

    #[test]
    fn hashes_tokens_to_hex() {
        let crypto = fast_crypto();
        let digest = crypto.hash_token("opaque-token");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, crypto.hash_token("opaque-token"));
    }

    #[test]
    fn generated_tokens_are_url_safe_and_distinct() {
        let crypto = fast_crypto();
        let a = crypto.generate_token().unwrap();
        let b = crypto.generate_token().unwrap();
        assert_ne!(a, b);
        assert_eq!(URL_SAFE_NO_PAD.decode(&a).unwrap().len(), 32);
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(matches!(
            AuthCrypto::new("", "token"),
            Err(AuthCryptoError::EmptyPasswordPepper)
        ));
        assert!(matches!(
            AuthCrypto::new("pepper", ""),
            Err(AuthCryptoError::EmptyTokenKey)
        ));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let crypto = fast_crypto();
        assert!(crypto.verify_password("x", "not-a-phc-string").is_err());
    }
}
