use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{BlobStore, StorageError, StoredBlob};

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

/// Public blob storage reached over HTTP: `PUT <api_url>/<path>` with a
/// bearer token, answering `{ "url": ... }`.
#[derive(Clone)]
pub struct HttpBlobStore {
    client: Client,
    api_url: Url,
    token: String,
}

impl fmt::Debug for HttpBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBlobStore")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl HttpBlobStore {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Self::with_client(client, api_url, token)
    }

    pub fn with_client(
        client: Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let api_url = Url::parse(&api_url.into())?;
        if api_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            client,
            api_url,
            token: token.into(),
        })
    }

    /// Each key segment is percent-encoded, so `#`, `?` and `%` in an
    /// uploaded file name stay part of the object path.
    fn object_url(&self, path: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, StorageError> {
        let size = bytes.len();
        let response = self
            .client
            .put(self.object_url(path))
            .bearer_auth(&self.token)
            .header("x-content-type", content_type)
            .header("x-access", "public")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, path, "blob store rejected upload");
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let PutResponse { url } = response.json().await?;
        debug!(path, size, url = %url, "blob stored");
        Ok(StoredBlob { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(api_url: &str) -> HttpBlobStore {
        HttpBlobStore::with_client(Client::new(), api_url, "token")
            .expect("valid api url")
    }

    #[test]
    fn object_url_appends_key_segments() {
        let url = store("https://blob.example/v1/")
            .object_url("artwork/1-abc-portail.jpg");
        assert_eq!(
            url.as_str(),
            "https://blob.example/v1/artwork/1-abc-portail.jpg"
        );
    }

    #[test]
    fn reserved_characters_stay_in_the_key() {
        let url = store("https://blob.example/v1")
            .object_url("artwork/1-abc-portail #2?v=1%.jpg");

        assert_eq!(url.path(), "/v1/artwork/1-abc-portail%20%232%3Fv=1%25.jpg");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn distinct_names_map_to_distinct_urls() {
        let store = store("https://blob.example");
        let hashed = store.object_url("artwork/1-abc-a#1.jpg");
        let queried = store.object_url("artwork/1-abc-a?1.jpg");
        assert_ne!(hashed, queried);
    }

    #[test]
    fn rejects_unusable_api_url() {
        assert!(matches!(
            HttpBlobStore::with_client(Client::new(), "not a url", "token"),
            Err(StorageError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpBlobStore::with_client(
                Client::new(),
                "mailto:blob@example.fr",
                "token"
            ),
            Err(StorageError::InvalidUrl(_))
        ));
    }
}
