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
use super::RecordData;
use crate::domain::record::models::CreateRecordCommand;
use crate::domain::record::models::Genre;
use crate::domain::record::models::RecordName;
use crate::domain::record::models::ReleaseYear;
use crate::domain::record::models::UserId;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;
use crate::record::errors::RecordError;

pub async fn create_record<S: RecordServicePort>(
    State(state): State<AppState<S>>,
    user_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateRecordResponseData>, ApiError> {
    let Path(user_id) = user_id?;
    let Json(body) = body?;

    state
        .record_service
        .create_record(UserId(user_id), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref record| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateRecordResponseData {
                    record: record.into(),
                },
            )
        })
}

/// HTTP request body for creating a record (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRecordRequest {
    name: Option<String>,
    genre: Option<String>,
    year: Option<i32>,
}

impl CreateRecordRequest {
    fn try_into_command(self) -> Result<CreateRecordCommand, RecordError> {
        match (self.name, self.genre, self.year) {
            (Some(name), Some(genre), Some(year)) => Ok(CreateRecordCommand {
                name: RecordName::new(name)?,
                genre: Genre::new(genre)?,
                year: ReleaseYear::new(year)?,
            }),
            (name, genre, year) => Err(RecordError::MissingFields(
                missing_fields(&[
                    ("name", name.is_some()),
                    ("genre", genre.is_some()),
                    ("year", year.is_some()),
                ])
                .unwrap_or_default(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRecordResponseData {
    pub record: RecordData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, genre: Option<&str>, year: Option<i32>) -> CreateRecordRequest {
        CreateRecordRequest {
            name: name.map(str::to_string),
            genre: genre.map(str::to_string),
            year,
        }
    }

    #[test]
    fn test_complete_request_converts() {
        let command = request(Some("Inception"), Some("SciFi"), Some(2010))
            .try_into_command()
            .unwrap();

        assert_eq!(command.name.as_str(), "Inception");
        assert_eq!(command.genre.as_str(), "SciFi");
        assert_eq!(command.year.value(), 2010);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let result = request(Some("Inception"), None, None).try_into_command();

        assert!(matches!(result, Err(RecordError::MissingFields(ref f)) if f == "genre, year"));
    }

    #[test]
    fn test_zero_year_rejected() {
        let result = request(Some("Inception"), Some("SciFi"), Some(0)).try_into_command();

        assert!(matches!(result, Err(RecordError::InvalidYear(_))));
    }
}
