use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::register::CredentialsRequest;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.try_into_parts()?;

    state
        .credential_service
        .login(LoginCommand { username, password })
        .await
        .map_err(ApiError::from)
        .map(|issued| ApiSuccess::new(StatusCode::OK, LoginResponseData { token: issued.token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
