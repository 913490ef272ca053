use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::authorization_token;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;

/// Token probe: answers with the identity the presented token proves.
pub async fn protected<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<ProtectedResponseData>, ApiError> {
    let token = authorization_token(&headers)?;
    let user_id = state.credential_service.authorize(token)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: "This is protected data".to_string(),
            user_id: user_id.0,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub user_id: i64,
}
