use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use api_gateway::domain::forward::service::ForwardService;
use api_gateway::inbound::http::router::create_router;
use api_gateway::outbound::HttpAuthorityClient;
use async_trait::async_trait;
use auth::Authenticator;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::models::Credential;
use auth_service::credential::models::NewCredential;
use auth_service::credential::models::UserId;
use auth_service::credential::models::Username;
use auth_service::credential::ports::CredentialRepository;
use auth_service::outbound::catalogue::HttpCatalogueClient;
use catalogue_service::record::errors::RecordError;
use catalogue_service::record::models::CreateRecordCommand;
use catalogue_service::record::models::Record;
use catalogue_service::record::models::RecordId;
use catalogue_service::record::models::RecordKey;
use catalogue_service::record::models::UserId as OwnerId;
use catalogue_service::record::ports::RecordRepository;
use tokio::net::TcpListener;

/// Credential store held in memory.
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

/// Record store held in memory.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<Record>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn list_by_user(&self, user_id: OwnerId) -> Result<Vec<Record>, RecordError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        user_id: OwnerId,
        command: &CreateRecordCommand,
    ) -> Result<Record, RecordError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let record = Record {
            id: RecordId(*next_id),
            user_id,
            name: command.name.clone(),
            genre: command.genre.clone(),
            year: command.year,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_key(
        &self,
        user_id: OwnerId,
        key: &RecordKey,
    ) -> Result<Option<Record>, RecordError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.user_id == user_id && r.name == key.name && r.year == key.year)
            .cloned())
    }

    async fn delete_by_key(&self, user_id: OwnerId, key: &RecordKey) -> Result<u64, RecordError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.user_id == user_id && r.name == key.name && r.year == key.year));
        Ok((before - records.len()) as u64)
    }

    async fn ping(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    (listener, format!("http://127.0.0.1:{}", port))
}

/// Base URL on which nothing listens.
pub async fn dead_url() -> String {
    let (listener, url) = bind().await;
    drop(listener);
    url
}

async fn spawn_catalogue() -> String {
    let (listener, url) = bind().await;

    let record_service = Arc::new(
        catalogue_service::domain::record::service::RecordService::new(Arc::new(
            InMemoryRecordRepository::default(),
        )),
    );
    let router = catalogue_service::inbound::http::router::create_router(record_service);

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    url
}

async fn spawn_authority(catalogue_url: &str) -> String {
    let (listener, url) = bind().await;

    let authenticator = Arc::new(Authenticator::new(b"gateway-e2e-secret-for-tokens!!!"));
    let credential_service = Arc::new(
        auth_service::domain::credential::service::CredentialService::new(
            Arc::new(InMemoryCredentialRepository::default()),
            Arc::clone(&authenticator),
        ),
    );
    let catalogue = HttpCatalogueClient::new(catalogue_url, Duration::from_secs(5))
        .expect("Failed to build catalogue client");
    let record_service = Arc::new(auth_service::domain::record::service::RecordService::new(
        Arc::new(catalogue),
        authenticator,
    ));
    let router =
        auth_service::inbound::http::router::create_router(credential_service, record_service);

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    url
}

/// Gateway under test, optionally backed by the full stack
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn catalogue, authority and gateway wired together
    pub async fn spawn() -> Self {
        let catalogue_url = spawn_catalogue().await;
        let authority_url = spawn_authority(&catalogue_url).await;
        Self::spawn_with_authority(&authority_url).await
    }

    /// Spawn only the gateway, talking to the authority at `authority_url`
    pub async fn spawn_with_authority(authority_url: &str) -> Self {
        let (listener, address) = bind().await;

        let authority = HttpAuthorityClient::new(authority_url, Duration::from_secs(5))
            .expect("Failed to build authority client");
        let router = create_router(Arc::new(ForwardService::new(Arc::new(authority))));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
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
}
