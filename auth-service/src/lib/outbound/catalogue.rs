//! HTTP adapter for the [`RecordCatalogue`] port.
//!
//! The owner's `user_id` travels in the request path as a plain assertion;
//! the catalogue accepts it without further checks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::credential::models::UserId;
use crate::record::errors::RecordError;
use crate::record::models::NewRecord;
use crate::record::models::Record;
use crate::record::models::RecordKey;
use crate::record::ports::RecordCatalogue;

pub struct HttpCatalogueClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogueClient {
    /// Create a client for the catalogue at `base_url`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn records_url(&self, user_id: UserId) -> String {
        format!("{}/catalogue/users/{}/records", self.base_url, user_id)
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct RecordsData {
    records: Vec<Record>,
}

#[derive(Deserialize)]
struct RecordData {
    record: Record,
}

#[derive(Deserialize)]
struct ErrorData {
    kind: String,
    message: String,
}

fn transport_error(e: reqwest::Error) -> RecordError {
    RecordError::DownstreamUnavailable(e.to_string())
}

/// Decode a successful answer, or re-wrap a failed one into [`RecordError`].
async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, RecordError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(transport_error);
    }

    // Only the catalogue's own envelope is trusted; a bare 404 means a wrong base path.
    let error = response
        .json::<Envelope<ErrorData>>()
        .await
        .map(|envelope| envelope.data)
        .ok();

    Err(match (status, error) {
        (StatusCode::BAD_REQUEST, Some(error)) => RecordError::MissingFields(error.message),
        (StatusCode::NOT_FOUND, Some(error)) if error.kind == "not_found" => {
            RecordError::NotFound(error.message)
        }
        (status, Some(error)) => {
            RecordError::StoreError(format!("catalogue answered {}: {}", status, error.message))
        }
        (status, None) => RecordError::StoreError(format!("catalogue answered {}", status)),
    })
}

#[async_trait]
impl RecordCatalogue for HttpCatalogueClient {
    async fn list(&self, user_id: UserId) -> Result<Vec<Record>, RecordError> {
        let response = self
            .client
            .get(self.records_url(user_id))
            .send()
            .await
            .map_err(transport_error)?;

        read_data::<RecordsData>(response)
            .await
            .map(|data| data.records)
    }

    async fn create(&self, user_id: UserId, record: &NewRecord) -> Result<Record, RecordError> {
        let response = self
            .client
            .post(self.records_url(user_id))
            .json(&json!({
                "name": record.name,
                "genre": record.genre,
                "year": record.year,
            }))
            .send()
            .await
            .map_err(transport_error)?;

        read_data::<RecordData>(response).await.map(|data| data.record)
    }

    async fn delete(&self, user_id: UserId, key: &RecordKey) -> Result<(), RecordError> {
        let response = self
            .client
            .delete(self.records_url(user_id))
            .json(&json!({
                "name": key.name,
                "year": key.year,
            }))
            .send()
            .await
            .map_err(transport_error)?;

        read_data::<serde_json::Value>(response).await.map(|_| ())
    }
}
