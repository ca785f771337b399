//! Public image storage for admin uploads.

pub mod http;
pub mod path;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpBlobStore;
pub use path::upload_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("blob storage is not configured")]
    NotConfigured,

    #[error("invalid blob storage url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("blob store answered {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("blob store request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StorageError>;
}

/// Stand-in used when no storage API is configured: every upload fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredBlobStore;

#[async_trait]
impl BlobStore for UnconfiguredBlobStore {
    async fn put(
        &self,
        _path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredBlob, StorageError> {
        Err(StorageError::NotConfigured)
    }
}
