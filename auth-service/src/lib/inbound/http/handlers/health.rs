use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;

pub async fn health<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
) -> Result<ApiSuccess<HealthResponseData>, ApiError> {
    state
        .credential_service
        .check_health()
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                HealthResponseData {
                    message: "Database connected.".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub message: String,
}
