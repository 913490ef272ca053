use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::models::Credential;
use auth_service::credential::models::NewCredential;
use auth_service::credential::models::UserId;
use auth_service::credential::models::Username;
use auth_service::credential::ports::CredentialRepository;
use auth_service::domain::credential::service::CredentialService;
use auth_service::domain::record::service::RecordService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::catalogue::HttpCatalogueClient;
use catalogue_service::record::errors::RecordError as CatalogueError;
use catalogue_service::record::models as catalogue;
use catalogue_service::record::ports::RecordRepository;

pub const JWT_SECRET: &[u8] = b"auth-service-integration-secret!!";

/// Credential repository backed by a vector, standing in for Postgres.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: Mutex<Vec<Credential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let mut credentials = self.credentials.lock().unwrap();
        if credentials
            .iter()
            .any(|c| c.username == credential.username)
        {
            return Err(CredentialError::DuplicateUsername(
                credential.username.to_string(),
            ));
        }

        let stored = Credential {
            id: UserId(credentials.len() as i64 + 1),
            username: credential.username,
            password_hash: credential.password_hash,
        };
        credentials.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError> {
        let credentials = self.credentials.lock().unwrap();
        Ok(credentials.iter().find(|c| &c.username == username).cloned())
    }

    async fn ping(&self) -> Result<(), CredentialError> {
        Ok(())
    }
}

/// Catalogue record repository backed by a vector.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<catalogue::Record>>,
}

impl InMemoryRecordRepository {
    fn matches(
        record: &catalogue::Record,
        user_id: catalogue::UserId,
        key: &catalogue::RecordKey,
    ) -> bool {
        record.user_id == user_id && record.name == key.name && record.year == key.year
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn list_by_user(
        &self,
        user_id: catalogue::UserId,
    ) -> Result<Vec<catalogue::Record>, CatalogueError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        user_id: catalogue::UserId,
        command: &catalogue::CreateRecordCommand,
    ) -> Result<catalogue::Record, CatalogueError> {
        let mut records = self.records.lock().unwrap();
        let record = catalogue::Record {
            id: catalogue::RecordId(records.len() as i64 + 1),
            user_id,
            name: command.name.clone(),
            genre: command.genre.clone(),
            year: command.year,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_key(
        &self,
        user_id: catalogue::UserId,
        key: &catalogue::RecordKey,
    ) -> Result<Option<catalogue::Record>, CatalogueError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| Self::matches(r, user_id, key))
            .cloned())
    }

    async fn delete_by_key(
        &self,
        user_id: catalogue::UserId,
        key: &catalogue::RecordKey,
    ) -> Result<u64, CatalogueError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !Self::matches(r, user_id, key));
        Ok((before - records.len()) as u64)
    }

    async fn ping(&self) -> Result<(), CatalogueError> {
        Ok(())
    }
}

/// Spawn a catalogue over an in-memory store and return its base URL.
pub async fn spawn_catalogue() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let repository = Arc::new(InMemoryRecordRepository::default());
    let record_service = Arc::new(catalogue_service::domain::record::service::RecordService::new(
        repository,
    ));
    let router = catalogue_service::inbound::http::router::create_router(record_service);

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    format!("http://127.0.0.1:{}", port)
}

/// Base URL on which nothing listens.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the authority in front of a fresh in-memory catalogue
    pub async fn spawn() -> Self {
        let catalogue_url = spawn_catalogue().await;
        Self::spawn_with_catalogue(&catalogue_url).await
    }

    /// Spawn the authority talking to the catalogue at `catalogue_url`
    pub async fn spawn_with_catalogue(catalogue_url: &str) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let credential_service = Arc::new(CredentialService::new(
            Arc::new(InMemoryCredentialRepository::default()),
            Arc::clone(&authenticator),
        ));
        let catalogue = HttpCatalogueClient::new(catalogue_url, Duration::from_secs(5))
            .expect("Failed to build catalogue client");
        let record_service = Arc::new(RecordService::new(Arc::new(catalogue), authenticator));

        let router = create_router(credential_service, record_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register `username` and return the token of a fresh login.
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let credentials = serde_json::json!({"username": username, "password": password});

        let response = self
            .post("/auth/register")
            .json(&credentials)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self
            .post("/auth/login")
            .json(&credentials)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
