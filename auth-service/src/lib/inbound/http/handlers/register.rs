use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::missing_fields;
use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::Password;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::record::ports::RecordServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<C: CredentialServicePort, R: RecordServicePort>(
    State(state): State<AppState<C, R>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.try_into_parts()?;

    state
        .credential_service
        .register(RegisterCommand { username, password })
        .await
        .map_err(ApiError::from)
        .map(|ref credential| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    user: credential.into(),
                },
            )
        })
}

/// HTTP request body carrying a username and password (raw JSON)
///
/// Shared by registration and login.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    username: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    pub(crate) fn try_into_parts(self) -> Result<(Username, Password), CredentialError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => {
                Ok((Username::new(username)?, Password::new(password)?))
            }
            (username, password) => Err(CredentialError::MissingFields(
                missing_fields(&[
                    ("username", username.is_some()),
                    ("password", password.is_some()),
                ])
                .unwrap_or_default(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user: UserData,
}

/// Public view of a credential; the hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
}

impl From<&Credential> for UserData {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.0,
            username: credential.username.as_str().to_string(),
        }
    }
}
