#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use phenix_config::{
    AuthConfig, Config, ConfigMetadata, DatabaseConfig, MailConfig,
    ServerConfig, SiteConfig, StorageConfig,
};
use phenix_core::{
    auth::AuthCrypto,
    database::{DatabaseContext, InMemoryDatabase},
    mail::{DeliveryReceipt, EmailMessage, MailError, Mailer},
    storage::{BlobStore, StorageError, StoredBlob},
};
use phenix_server::{AppState, create_app, routes::paths};
use serde_json::json;
use tempfile::TempDir;

pub const ADMIN_USERNAME: &str = "atelier";
pub const ADMIN_PASSWORD: &str = "Forge#2024";
pub const RECIPIENT: &str = "atelier@example.fr";
pub const BROWSER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Cheap Argon2 parameters so the suites stay fast.
pub fn fast_crypto() -> AuthCrypto {
    let params = argon2::Params::new(8, 1, 1, Some(32)).expect("argon2 params");
    AuthCrypto::with_params("test-pepper", "test-token-key", params)
        .expect("crypto")
}

pub fn test_config(public_dir: PathBuf, password_hash: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            trust_proxy_headers: true,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        auth: AuthConfig {
            admin_username: ADMIN_USERNAME.into(),
            admin_password_hash: Some(password_hash),
            password_pepper: "test-pepper".into(),
            token_key: "test-token-key".into(),
            session_ttl: Duration::from_secs(3600),
        },
        mail: MailConfig {
            api: None,
            from: "site@example.fr".into(),
        },
        storage: StorageConfig {
            api_url: None,
            token: None,
        },
        site: SiteConfig {
            wasm_dir: public_dir.join("pkg"),
            public_dir,
            demo: false,
        },
        metadata: ConfigMetadata::default(),
    }
}

#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub failure: Option<MailError>,
}

impl RecordingMailer {
    pub fn failing(error: MailError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        message: EmailMessage,
    ) -> Result<DeliveryReceipt, MailError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent.lock().expect("mailer lock").push(message);
        Ok(DeliveryReceipt {
            id: "receipt-1".into(),
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

mockall::mock! {
    pub Notifier {}

    #[async_trait]
    impl Mailer for Notifier {
        async fn send(
            &self,
            message: EmailMessage,
        ) -> Result<DeliveryReceipt, MailError>;

        fn name(&self) -> &'static str;
    }
}

mockall::mock! {
    pub Blobs {}

    #[async_trait]
    impl BlobStore for Blobs {
        async fn put(
            &self,
            path: &str,
            bytes: Vec<u8>,
            content_type: &str,
        ) -> Result<StoredBlob, StorageError>;
    }
}

/// Blob store that echoes the path back under a fake public host.
pub fn echoing_blobs() -> MockBlobs {
    let mut blobs = MockBlobs::new();
    blobs.expect_put().returning(|path, _, _| {
        Ok(StoredBlob {
            url: format!("https://blob.example/{path}"),
        })
    });
    blobs
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    _public_dir: TempDir,
}

pub struct TestAppBuilder {
    mailer: RecordingMailer,
    notifier: Option<MockNotifier>,
    blobs: Option<MockBlobs>,
    recipient: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            mailer: RecordingMailer::default(),
            notifier: None,
            blobs: None,
            recipient: true,
        }
    }

    pub fn mailer(mut self, mailer: RecordingMailer) -> Self {
        self.mailer = mailer;
        self
    }

    /// Replaces the recording mailer with a mock carrying its own
    /// expectations.
    pub fn notifier(mut self, notifier: MockNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn blobs(mut self, blobs: MockBlobs) -> Self {
        self.blobs = Some(blobs);
        self
    }

    pub fn without_recipient(mut self) -> Self {
        self.recipient = false;
        self
    }

    pub async fn build(self) -> TestApp {
        let public_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(public_dir.path().join("styles.css"), "body {}")
            .expect("write stylesheet");

        let crypto = Arc::new(fast_crypto());
        let hash = crypto.hash_password(ADMIN_PASSWORD).expect("hash");
        let config = Arc::new(test_config(public_dir.path().to_path_buf(), hash));

        let db = DatabaseContext::in_memory(InMemoryDatabase::new());
        if self.recipient {
            db.recipients()
                .ensure_default(RECIPIENT)
                .await
                .expect("recipient");
        }

        let mailer = Arc::new(self.mailer);
        let active_mailer: Arc<dyn Mailer> = match self.notifier {
            Some(notifier) => Arc::new(notifier),
            None => mailer.clone(),
        };
        let blobs = self.blobs.unwrap_or_else(echoing_blobs);
        let state =
            AppState::new(config, db, crypto, active_mailer, Arc::new(blobs));
        let server =
            TestServer::new(create_app(state.clone())).expect("test server");

        TestApp {
            server,
            state,
            mailer,
            _public_dir: public_dir,
        }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        TestAppBuilder::new().build().await
    }

    /// Logs in as the configured admin and returns the `Cookie` header value.
    pub async fn login(&self) -> String {
        let response = self
            .server
            .post(paths::api::ADMIN_LOGIN)
            .json(&json!({
                "username": ADMIN_USERNAME,
                "password": ADMIN_PASSWORD,
            }))
            .await;
        response.assert_status(StatusCode::OK);
        session_cookie(&response).expect("session cookie")
    }
}

/// `name=value` pair of the session cookie set by a response.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("phenix_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}
