use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::HeaderValue;

use crate::forward::errors::GatewayError;
use crate::forward::models::Route;
use crate::forward::models::UpstreamRequest;
use crate::forward::models::UpstreamResponse;
use crate::forward::ports::Authority;
use crate::forward::ports::ForwardServicePort;

/// Stateless relay in front of the authority.
///
/// The token is only checked for presence here; the authority validates it.
pub struct ForwardService<A>
where
    A: Authority,
{
    authority: Arc<A>,
}

impl<A> ForwardService<A>
where
    A: Authority,
{
    pub fn new(authority: Arc<A>) -> Self {
        Self { authority }
    }
}

#[async_trait]
impl<A> ForwardServicePort for ForwardService<A>
where
    A: Authority,
{
    async fn forward(
        &self,
        route: Route,
        authorization: Option<HeaderValue>,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<UpstreamResponse, GatewayError> {
        // Opaque bytes count as a token; the authority will reject them.
        let token_present = authorization.as_ref().is_some_and(|value| {
            value
                .to_str()
                .map(|token| !token.trim().is_empty())
                .unwrap_or(true)
        });

        if route.requires_token() && !token_present {
            tracing::debug!(route = ?route, "Rejected without token");
            return Err(GatewayError::MissingToken);
        }

        let response = self
            .authority
            .send(UpstreamRequest {
                route,
                authorization,
                content_type,
                body,
            })
            .await?;

        tracing::debug!(route = ?route, status = response.status, "Relayed");

        Ok(response)
    }
}
