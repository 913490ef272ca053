use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest::Method;

use crate::forward::errors::GatewayError;
use crate::forward::models::UpstreamRequest;
use crate::forward::models::UpstreamResponse;
use crate::forward::models::Verb;
use crate::forward::ports::Authority;

/// reqwest based transport to the authentication authority.
pub struct HttpAuthorityClient {
    client: Client,
    base_url: String,
}

impl HttpAuthorityClient {
    /// # Errors
    /// Returns error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Delete => Method::DELETE,
    }
}

fn unreachable_error(e: reqwest::Error) -> GatewayError {
    GatewayError::UpstreamUnreachable(e.to_string())
}

#[async_trait]
impl Authority for HttpAuthorityClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, GatewayError> {
        let url = format!("{}{}", self.base_url, request.route.upstream_path());

        let mut builder = self.client.request(method(request.route.verb()), url);
        if let Some(authorization) = request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status().as_u16();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(unreachable_error)?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
