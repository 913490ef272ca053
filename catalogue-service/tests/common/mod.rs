use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use catalogue_service::domain::record::service::RecordService;
use catalogue_service::inbound::http::router::create_router;
use catalogue_service::record::errors::RecordError;
use catalogue_service::record::models::CreateRecordCommand;
use catalogue_service::record::models::Record;
use catalogue_service::record::models::RecordId;
use catalogue_service::record::models::RecordKey;
use catalogue_service::record::models::UserId;
use catalogue_service::record::ports::RecordRepository;

/// Record repository backed by a vector, standing in for Postgres.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<Record>>,
    unavailable: AtomicBool,
}

impl InMemoryRecordRepository {
    /// Make every subsequent call fail like a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RecordError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(RecordError::DatabaseError(
                "connection refused (host=postgres user=admin)".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn matches(record: &Record, user_id: UserId, key: &RecordKey) -> bool {
        record.user_id == user_id && record.name == key.name && record.year == key.year
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Record>, RecordError> {
        self.check_available()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        user_id: UserId,
        command: &CreateRecordCommand,
    ) -> Result<Record, RecordError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let record = Record {
            id: RecordId(id),
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
        user_id: UserId,
        key: &RecordKey,
    ) -> Result<Option<Record>, RecordError> {
        self.check_available()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| Self::matches(r, user_id, key))
            .cloned())
    }

    async fn delete_by_key(&self, user_id: UserId, key: &RecordKey) -> Result<u64, RecordError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !Self::matches(r, user_id, key));
        Ok((before - records.len()) as u64)
    }

    async fn ping(&self) -> Result<(), RecordError> {
        self.check_available()
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryRecordRepository>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryRecordRepository::default());
        let record_service = Arc::new(RecordService::new(Arc::clone(&repository)));
        let router = create_router(record_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
        }
    }

    /// Path of a user's record collection
    pub fn records_path(user_id: i64) -> String {
        format!("/catalogue/users/{}/records", user_id)
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
