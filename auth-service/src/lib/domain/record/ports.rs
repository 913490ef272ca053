use async_trait::async_trait;

use crate::credential::models::UserId;
use crate::record::errors::RecordError;
use crate::record::models::NewRecord;
use crate::record::models::Record;
use crate::record::models::RecordBody;
use crate::record::models::RecordKey;

/// Port for token-gated record operations.
///
/// Every operation authorizes the token first; field validation and the
/// catalogue call happen only for an accepted token.
#[async_trait]
pub trait RecordServicePort: Send + Sync + 'static {
    /// List the records of the token's owner.
    ///
    /// # Errors
    /// * `Unauthorized` - Token missing, expired or invalid
    /// * `DownstreamUnavailable` - Catalogue could not be reached
    /// * `StoreError` - Catalogue failed
    async fn list_records(&self, token: Option<&str>) -> Result<Vec<Record>, RecordError>;

    /// Create a record owned by the token's owner.
    ///
    /// # Errors
    /// * `Unauthorized` - Token missing, expired or invalid
    /// * `MalformedBody` - Body could not be read
    /// * `MissingFields` / `InvalidField` - Draft incomplete or invalid
    /// * `DownstreamUnavailable` - Catalogue could not be reached
    /// * `StoreError` - Catalogue failed
    async fn add_record(&self, token: Option<&str>, body: RecordBody)
        -> Result<Record, RecordError>;

    /// Delete the token owner's records matching `name` and `year`.
    ///
    /// # Returns
    /// The key that was deleted
    ///
    /// # Errors
    /// * `Unauthorized` - Token missing, expired or invalid
    /// * `MalformedBody` - Body could not be read
    /// * `MissingFields` / `InvalidField` - Draft incomplete or invalid
    /// * `NotFound` - No matching record
    /// * `DownstreamUnavailable` - Catalogue could not be reached
    /// * `StoreError` - Catalogue failed
    async fn remove_record(
        &self,
        token: Option<&str>,
        body: RecordBody,
    ) -> Result<RecordKey, RecordError>;
}

/// Trust handoff to the catalogue.
///
/// Implementations assert `user_id` to the catalogue, which does not
/// re-authenticate it. A mutually authenticated transport belongs here.
#[async_trait]
pub trait RecordCatalogue: Send + Sync + 'static {
    async fn list(&self, user_id: UserId) -> Result<Vec<Record>, RecordError>;

    async fn create(&self, user_id: UserId, record: &NewRecord) -> Result<Record, RecordError>;

    /// # Errors
    /// * `NotFound` - Catalogue holds no matching record
    async fn delete(&self, user_id: UserId, key: &RecordKey) -> Result<(), RecordError>;
}
