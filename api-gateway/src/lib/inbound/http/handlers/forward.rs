use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;

use super::relay;
use super::ApiError;
use super::Relayed;
use crate::forward::models::Route;
use crate::forward::ports::ForwardServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    relay(state.forward_service.as_ref(), Route::Register, &headers, body).await
}

pub async fn login<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    relay(state.forward_service.as_ref(), Route::Login, &headers, body).await
}

pub async fn protected<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<Relayed, ApiError> {
    relay(
        state.forward_service.as_ref(),
        Route::Protected,
        &headers,
        Bytes::new(),
    )
    .await
}

pub async fn list_records<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<Relayed, ApiError> {
    relay(
        state.forward_service.as_ref(),
        Route::ListRecords,
        &headers,
        Bytes::new(),
    )
    .await
}

pub async fn add_record<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    relay(state.forward_service.as_ref(), Route::AddRecord, &headers, body).await
}

pub async fn remove_record<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relayed, ApiError> {
    relay(
        state.forward_service.as_ref(),
        Route::RemoveRecord,
        &headers,
        body,
    )
    .await
}

/// Authority health probe, kept under its historical name.
pub async fn testauth<S: ForwardServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<Relayed, ApiError> {
    relay(
        state.forward_service.as_ref(),
        Route::Health,
        &headers,
        Bytes::new(),
    )
    .await
}
