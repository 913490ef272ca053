use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::RecordData;
use crate::domain::record::models::UserId;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_records<S: RecordServicePort>(
    State(state): State<AppState<S>>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<ListRecordsResponseData>, ApiError> {
    let Path(user_id) = user_id?;

    state
        .record_service
        .list_records(UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map(|records| {
            ApiSuccess::new(
                StatusCode::OK,
                ListRecordsResponseData {
                    records: records.iter().map(RecordData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRecordsResponseData {
    pub records: Vec<RecordData>,
}
