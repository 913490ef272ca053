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

use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::protected::protected;
use super::handlers::records::add_record;
use super::handlers::records::list_records;
use super::handlers::records::remove_record;
use super::handlers::register::register;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::record::ports::RecordServicePort;

pub struct AppState<C, R>
where
    C: CredentialServicePort,
    R: RecordServicePort,
{
    pub credential_service: Arc<C>,
    pub record_service: Arc<R>,
}

impl<C, R> Clone for AppState<C, R>
where
    C: CredentialServicePort,
    R: RecordServicePort,
{
    fn clone(&self) -> Self {
        Self {
            credential_service: Arc::clone(&self.credential_service),
            record_service: Arc::clone(&self.record_service),
        }
    }
}

pub fn create_router<C, R>(credential_service: Arc<C>, record_service: Arc<R>) -> Router
where
    C: CredentialServicePort,
    R: RecordServicePort,
{
    let state = AppState {
        credential_service,
        record_service,
    };

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

    let public_routes = Router::new()
        .route("/auth/register", post(register::<C, R>))
        .route("/auth/login", post(login::<C, R>))
        .route("/auth/health", get(health::<C, R>));

    let token_routes = Router::new()
        .route("/auth/protected", get(protected::<C, R>))
        .route(
            "/auth/records",
            get(list_records::<C, R>)
                .post(add_record::<C, R>)
                .delete(remove_record::<C, R>),
        );

    Router::new()
        .merge(public_routes)
        .merge(token_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
