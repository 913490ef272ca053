use axum::body::Body;
use axum::body::Bytes;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::forward::errors::GatewayError;
use crate::forward::models::Route;
use crate::forward::models::UpstreamResponse;
use crate::forward::ports::ForwardServicePort;

pub mod forward;

/// Authority answer relayed with its status, content type and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relayed(UpstreamResponse);

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let mut response = Response::new(Body::from(self.0.body));
        *response.status_mut() = status;
        if let Some(content_type) = self.0.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    MissingToken,
    UpstreamUnreachable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token", "No token provided"),
            ApiError::UpstreamUnreachable => (
                StatusCode::BAD_GATEWAY,
                "upstream_unreachable",
                "Authentication service unreachable",
            ),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, kind, message.to_string())),
        )
            .into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingToken => ApiError::MissingToken,
            GatewayError::UpstreamUnreachable(ref cause) => {
                tracing::error!(error = %cause, "Authority unreachable");
                ApiError::UpstreamUnreachable
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
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

/// Relay one request for `route`, passing `Authorization` and the body through.
pub(crate) async fn relay<S: ForwardServicePort>(
    service: &S,
    route: Route,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    service
        .forward(
            route,
            headers.get(AUTHORIZATION).cloned(),
            headers.get(CONTENT_TYPE).cloned(),
            body,
        )
        .await
        .map(Relayed)
        .map_err(ApiError::from)
}
