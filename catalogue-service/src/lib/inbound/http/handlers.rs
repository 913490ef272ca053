use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::record::errors::RecordError;
use crate::record::models::Record;

pub mod create_record;
pub mod delete_record;
pub mod health;
pub mod list_records;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    MissingFields(String),
    NotFound(String),
    StoreError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::MissingFields(msg) => (StatusCode::BAD_REQUEST, "missing_fields", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::StoreError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MissingFields(_)
            | RecordError::InvalidName(_)
            | RecordError::InvalidGenre(_)
            | RecordError::InvalidYear(_) => ApiError::MissingFields(err.to_string()),
            RecordError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RecordError::DatabaseError(ref cause) => {
                tracing::error!(error = %cause, "Record store failure");
                ApiError::StoreError("Record store failure".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MissingFields(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MissingFields(format!("Invalid user id: {}", rejection.body_text()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                kind: kind.to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: String,
    pub message: String,
}

/// Wire representation of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordData {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub genre: String,
    pub year: i32,
}

impl From<&Record> for RecordData {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.0,
            user_id: record.user_id.0,
            name: record.name.as_str().to_string(),
            genre: record.genre.as_str().to_string(),
            year: record.year.value(),
        }
    }
}

/// Comma separated names of the absent fields, `None` when all are present.
pub(crate) fn missing_fields(fields: &[(&str, bool)]) -> Option<String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(missing.join(", "))
    }
}
