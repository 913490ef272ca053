use async_trait::async_trait;

use crate::record::errors::RecordError;
use crate::record::models::CreateRecordCommand;
use crate::record::models::Record;
use crate::record::models::RecordKey;
use crate::record::models::UserId;

/// Port for record domain service operations.
///
/// Every operation is scoped by a caller-asserted `user_id`; this service
/// performs no authentication of its own.
#[async_trait]
pub trait RecordServicePort: Send + Sync + 'static {
    /// List all records owned by a user.
    ///
    /// # Returns
    /// Owned records, empty when the user has none
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_records(&self, user_id: UserId) -> Result<Vec<Record>, RecordError>;

    /// Create a record owned by a user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_record(
        &self,
        user_id: UserId,
        command: CreateRecordCommand,
    ) -> Result<Record, RecordError>;

    /// Delete every record of a user matching a natural key.
    ///
    /// # Errors
    /// * `NotFound` - No record matches the key
    /// * `DatabaseError` - Database operation failed
    async fn delete_record(&self, user_id: UserId, key: &RecordKey) -> Result<(), RecordError>;

    /// Check that the record store is reachable.
    ///
    /// # Errors
    /// * `DatabaseError` - Store did not answer
    async fn check_health(&self) -> Result<(), RecordError>;
}

/// Persistence operations for records.
#[async_trait]
pub trait RecordRepository: Send + Sync + 'static {
    /// Retrieve all records of a user, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Record>, RecordError>;

    /// Persist a new record.
    ///
    /// # Returns
    /// Created record with its generated identifier
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        user_id: UserId,
        command: &CreateRecordCommand,
    ) -> Result<Record, RecordError>;

    /// Retrieve the first record of a user matching a natural key.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_key(
        &self,
        user_id: UserId,
        key: &RecordKey,
    ) -> Result<Option<Record>, RecordError>;

    /// Remove all records of a user matching a natural key.
    ///
    /// # Returns
    /// Number of removed records
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_key(&self, user_id: UserId, key: &RecordKey) -> Result<u64, RecordError>;

    /// Round trip to the store.
    ///
    /// # Errors
    /// * `DatabaseError` - Store did not answer
    async fn ping(&self) -> Result<(), RecordError>;
}
