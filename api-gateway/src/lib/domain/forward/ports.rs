use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::HeaderValue;

use crate::forward::errors::GatewayError;
use crate::forward::models::Route;
use crate::forward::models::UpstreamRequest;
use crate::forward::models::UpstreamResponse;

/// Port for relaying a public route to the authority.
#[async_trait]
pub trait ForwardServicePort: Send + Sync + 'static {
    /// Relay one client request.
    ///
    /// # Returns
    /// The authority's answer, whatever its status
    ///
    /// # Errors
    /// * `MissingToken` - Route needs a token and none was sent; nothing is forwarded
    /// * `UpstreamUnreachable` - Authority could not be reached
    async fn forward(
        &self,
        route: Route,
        authorization: Option<HeaderValue>,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<UpstreamResponse, GatewayError>;
}

/// Transport to the authentication authority.
#[async_trait]
pub trait Authority: Send + Sync + 'static {
    /// # Errors
    /// * `UpstreamUnreachable` - Connection failed or timed out
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, GatewayError>;
}
