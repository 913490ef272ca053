use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_record::create_record;
use super::handlers::delete_record::delete_record;
use super::handlers::health::health;
use super::handlers::list_records::list_records;
use crate::domain::record::ports::RecordServicePort;

pub struct AppState<S: RecordServicePort> {
    pub record_service: Arc<S>,
}

impl<S: RecordServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            record_service: Arc::clone(&self.record_service),
        }
    }
}

/// Routes of the catalogue.
///
/// Reachable from the authority's private network only: the `user_id` path
/// segment is trusted as-is.
pub fn create_router<S: RecordServicePort>(record_service: Arc<S>) -> Router {
    let state = AppState { record_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route(
            "/catalogue/users/:user_id/records",
            get(list_records::<S>)
                .post(create_record::<S>)
                .delete(delete_record::<S>),
        )
        .route("/catalogue/health", get(health::<S>))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
