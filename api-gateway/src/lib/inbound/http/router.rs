use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::forward::add_record;
use super::handlers::forward::list_records;
use super::handlers::forward::login;
use super::handlers::forward::protected;
use super::handlers::forward::register;
use super::handlers::forward::remove_record;
use super::handlers::forward::testauth;
use crate::forward::ports::ForwardServicePort;

pub struct AppState<S: ForwardServicePort> {
    pub forward_service: Arc<S>,
}

impl<S: ForwardServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            forward_service: Arc::clone(&self.forward_service),
        }
    }
}

/// Public routes of the system.
pub fn create_router<S: ForwardServicePort>(forward_service: Arc<S>) -> Router {
    let state = AppState { forward_service };

    // Headers are left out of the span: they carry bearer tokens.
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
        .route("/api/register", post(register::<S>))
        .route("/api/login", post(login::<S>))
        .route("/api/protected", get(protected::<S>))
        .route(
            "/api/records",
            get(list_records::<S>)
                .post(add_record::<S>)
                .delete(remove_record::<S>),
        )
        .route("/api/testauth", get(testauth::<S>))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
