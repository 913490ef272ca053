use axum::extract::rejection::JsonRejection;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::credential::errors::AuthorizationError;
use crate::credential::errors::CredentialError;
use crate::record::errors::RecordError;

pub mod health;
pub mod login;
pub mod protected;
pub mod records;
pub mod register;

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
    DuplicateUsername(String),
    UserNotFound(String),
    InvalidCredentials,
    MissingToken,
    TokenExpired,
    InvalidToken,
    NotFound(String),
    DownstreamUnavailable,
    StoreError,
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::MissingFields(msg) => (StatusCode::BAD_REQUEST, "missing_fields", msg),
            ApiError::DuplicateUsername(msg) => {
                (StatusCode::BAD_REQUEST, "duplicate_username", msg)
            }
            ApiError::UserNotFound(msg) => (StatusCode::NOT_FOUND, "user_not_found", msg),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials".to_string(),
            ),
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "No token provided".to_string(),
            ),
            ApiError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "token_expired",
                "Token has expired".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid token".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::DownstreamUnavailable => (
                StatusCode::BAD_GATEWAY,
                "downstream_unavailable",
                "Record service unavailable".to_string(),
            ),
            ApiError::StoreError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "Storage failure".to_string(),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::Missing => ApiError::MissingToken,
            AuthorizationError::Expired => ApiError::TokenExpired,
            AuthorizationError::Invalid => ApiError::InvalidToken,
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::MissingFields(_)
            | CredentialError::InvalidUsername(_)
            | CredentialError::InvalidPassword(_) => ApiError::MissingFields(err.to_string()),
            CredentialError::DuplicateUsername(_) => ApiError::DuplicateUsername(err.to_string()),
            CredentialError::UserNotFound(_) => ApiError::UserNotFound(err.to_string()),
            CredentialError::InvalidCredentials => ApiError::InvalidCredentials,
            CredentialError::DatabaseError(ref cause) => {
                tracing::error!(error = %cause, "Credential store failure");
                ApiError::StoreError
            }
            CredentialError::HashingFailed(ref cause) | CredentialError::TokenIssuance(ref cause) => {
                tracing::error!(error = %cause, "Credential processing failure");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Unauthorized(reason) => reason.into(),
            RecordError::MissingFields(_)
            | RecordError::MalformedBody(_)
            | RecordError::InvalidField(_) => {
                ApiError::MissingFields(err.to_string())
            }
            RecordError::NotFound(message) => ApiError::NotFound(message),
            RecordError::DownstreamUnavailable(ref cause) => {
                tracing::error!(error = %cause, "Catalogue unreachable");
                ApiError::DownstreamUnavailable
            }
            RecordError::StoreError(ref cause) => {
                tracing::error!(error = %cause, "Catalogue failure");
                ApiError::StoreError
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MissingFields(format!("Invalid request body: {}", rejection.body_text()))
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

/// Raw token from the `Authorization` header.
///
/// A header that is not visible ASCII is reported as an invalid token.
pub(crate) fn authorization_token(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| ApiError::InvalidToken))
        .transpose()
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
