use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::authorization_token;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::record::models::Record;
use crate::domain::record::models::RecordBody;
use crate::domain::record::models::RecordDraft;
use crate::domain::record::models::RecordKey;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;

/// Body of a record request; a rejection is handed to the service so that
/// token errors are still reported first.
fn record_body(body: Result<Json<RecordDraft>, JsonRejection>) -> RecordBody {
    body.map(|Json(draft)| draft)
        .map_err(|rejection| rejection.body_text())
}

pub async fn list_records<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<ListRecordsResponseData>, ApiError> {
    let token = authorization_token(&headers)?;

    state
        .record_service
        .list_records(token)
        .await
        .map_err(ApiError::from)
        .map(|records| ApiSuccess::new(StatusCode::OK, ListRecordsResponseData { records }))
}

pub async fn add_record<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
    headers: HeaderMap,
    body: Result<Json<RecordDraft>, JsonRejection>,
) -> Result<ApiSuccess<AddRecordResponseData>, ApiError> {
    let token = authorization_token(&headers)?;

    state
        .record_service
        .add_record(token, record_body(body))
        .await
        .map_err(ApiError::from)
        .map(|record| ApiSuccess::new(StatusCode::CREATED, AddRecordResponseData { record }))
}

pub async fn remove_record<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
    headers: HeaderMap,
    body: Result<Json<RecordDraft>, JsonRejection>,
) -> Result<ApiSuccess<RemoveRecordResponseData>, ApiError> {
    let token = authorization_token(&headers)?;

    state
        .record_service
        .remove_record(token, record_body(body))
        .await
        .map_err(ApiError::from)
        .map(|ref key| ApiSuccess::new(StatusCode::OK, key.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRecordsResponseData {
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddRecordResponseData {
    pub record: Record,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveRecordResponseData {
    pub message: String,
    pub name: String,
    pub year: i32,
}

impl From<&RecordKey> for RemoveRecordResponseData {
    fn from(key: &RecordKey) -> Self {
        Self {
            message: "Record deleted".to_string(),
            name: key.name.clone(),
            year: key.year,
        }
    }
}
