use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::missing_fields;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::record::models::RecordKey;
use crate::domain::record::models::RecordName;
use crate::domain::record::models::ReleaseYear;
use crate::domain::record::models::UserId;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;
use crate::record::errors::RecordError;

pub async fn delete_record<S: RecordServicePort>(
    State(state): State<AppState<S>>,
    user_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<DeleteRecordRequest>, JsonRejection>,
) -> Result<ApiSuccess<DeleteRecordResponseData>, ApiError> {
    let Path(user_id) = user_id?;
    let Json(body) = body?;
    let key = body.try_into_key()?;

    state
        .record_service
        .delete_record(UserId(user_id), &key)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, (&key).into()))
}

/// HTTP request body identifying the records to delete (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteRecordRequest {
    name: Option<String>,
    year: Option<i32>,
}

impl DeleteRecordRequest {
    fn try_into_key(self) -> Result<RecordKey, RecordError> {
        match (self.name, self.year) {
            (Some(name), Some(year)) => Ok(RecordKey {
                name: RecordName::new(name)?,
                year: ReleaseYear::new(year)?,
            }),
            (name, year) => Err(RecordError::MissingFields(
                missing_fields(&[("name", name.is_some()), ("year", year.is_some())])
                    .unwrap_or_default(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRecordResponseData {
    pub message: String,
    pub name: String,
    pub year: i32,
}

impl From<&RecordKey> for DeleteRecordResponseData {
    fn from(key: &RecordKey) -> Self {
        Self {
            message: "Record deleted".to_string(),
            name: key.name.as_str().to_string(),
            year: key.year.value(),
        }
    }
}
