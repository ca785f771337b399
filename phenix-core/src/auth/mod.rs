//! Admin authentication: password verification and in-memory sessions.

pub mod account;
pub mod crypto;
pub mod session;

pub use account::AdminAccount;
pub use crypto::{AuthCrypto, AuthCryptoError};
pub use session::{IssuedSession, Session, SessionStore};
