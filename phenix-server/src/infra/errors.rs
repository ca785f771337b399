use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use phenix_core::{CoreError, auth::AuthCryptoError, storage::StorageError};

pub type AppResult<T> = Result<T, AppError>;

pub const SERVER_ERROR: &str = "Erreur serveur";
pub const UNAUTHORIZED: &str = "Non autorisé";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        tracing::error!(error = %err, "core operation failed");
        match err {
            CoreError::NotFound(msg) => Self::not_found(msg),
            CoreError::InvalidInput(msg) => Self::bad_request(msg),
            _ => Self::internal(SERVER_ERROR),
        }
    }
}

impl From<AuthCryptoError> for AppError {
    fn from(err: AuthCryptoError) -> Self {
        tracing::error!(error = %err, "authentication crypto failed");
        Self::internal(SERVER_ERROR)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "blob upload failed");
        Self::internal("Erreur lors de l'upload des images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_hide_database_details() {
        let err = AppError::from(CoreError::Database("password=secret".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, SERVER_ERROR);
    }

    #[test]
    fn not_found_keeps_message() {
        let err = AppError::from(CoreError::NotFound("Œuvre non trouvée".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Œuvre non trouvée");
    }
}
