use std::sync::Arc;

use async_trait::async_trait;

use crate::record::errors::RecordError;
use crate::record::models::CreateRecordCommand;
use crate::record::models::Record;
use crate::record::models::RecordKey;
use crate::record::models::UserId;
use crate::record::ports::RecordRepository;
use crate::record::ports::RecordServicePort;

/// Domain service implementation for record operations.
pub struct RecordService<RR>
where
    RR: RecordRepository,
{
    repository: Arc<RR>,
}

impl<RR> RecordService<RR>
where
    RR: RecordRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RecordServicePort for RecordService<RR>
where
    RR: RecordRepository,
{
    async fn list_records(&self, user_id: UserId) -> Result<Vec<Record>, RecordError> {
        self.repository.list_by_user(user_id).await
    }

    async fn create_record(
        &self,
        user_id: UserId,
        command: CreateRecordCommand,
    ) -> Result<Record, RecordError> {
        let record = self.repository.create(user_id, &command).await?;

        tracing::info!(
            user_id = %user_id,
            record_id = record.id.0,
            "Record created"
        );

        Ok(record)
    }

    async fn delete_record(&self, user_id: UserId, key: &RecordKey) -> Result<(), RecordError> {
        let not_found = || RecordError::NotFound {
            name: key.name.to_string(),
            year: key.year.value(),
        };

        // Look up first so a miss is reported instead of deleting nothing.
        if self.repository.find_by_key(user_id, key).await?.is_none() {
            return Err(not_found());
        }

        let removed = self.repository.delete_by_key(user_id, key).await?;
        if removed == 0 {
            // Removed concurrently between lookup and delete
            return Err(not_found());
        }

        tracing::info!(user_id = %user_id, removed, "Records deleted");

        Ok(())
    }

    async fn check_health(&self) -> Result<(), RecordError> {
        self.repository.ping().await
    }
}
