use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::credential::authorization::authorize_token;
use crate::record::errors::RecordError;
use crate::record::models::Record;
use crate::record::models::RecordBody;
use crate::record::models::RecordKey;
use crate::record::ports::RecordCatalogue;
use crate::record::ports::RecordServicePort;

/// Domain service implementation for record operations.
pub struct RecordService<RC>
where
    RC: RecordCatalogue,
{
    catalogue: Arc<RC>,
    authenticator: Arc<Authenticator>,
}

impl<RC> RecordService<RC>
where
    RC: RecordCatalogue,
{
    pub fn new(catalogue: Arc<RC>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            catalogue,
            authenticator,
        }
    }
}

#[async_trait]
impl<RC> RecordServicePort for RecordService<RC>
where
    RC: RecordCatalogue,
{
    async fn list_records(&self, token: Option<&str>) -> Result<Vec<Record>, RecordError> {
        let user_id = authorize_token(&self.authenticator, token)?;
        self.catalogue.list(user_id).await
    }

    async fn add_record(
        &self,
        token: Option<&str>,
        body: RecordBody,
    ) -> Result<Record, RecordError> {
        let user_id = authorize_token(&self.authenticator, token)?;
        let record = body
            .map_err(RecordError::MalformedBody)?
            .into_new_record()?;

        let created = self.catalogue.create(user_id, &record).await?;
        tracing::info!(user_id = %user_id, record_id = created.id, "Record added");

        Ok(created)
    }

    async fn remove_record(
        &self,
        token: Option<&str>,
        body: RecordBody,
    ) -> Result<RecordKey, RecordError> {
        let user_id = authorize_token(&self.authenticator, token)?;
        let key = body.map_err(RecordError::MalformedBody)?.into_key()?;

        self.catalogue.delete(user_id, &key).await?;
        tracing::info!(user_id = %user_id, year = key.year, "Record removed");

        Ok(key)
    }
}
