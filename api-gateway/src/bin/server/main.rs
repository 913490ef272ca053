use std::sync::Arc;

use api_gateway::config::Config;
use api_gateway::domain::forward::service::ForwardService;
use api_gateway::inbound::http::router::create_router;
use api_gateway::outbound::HttpAuthorityClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-gateway",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        authority_url = %config.authority.base_url,
        timeout_secs = config.authority.timeout_secs,
        "Configuration loaded"
    );

    let authority = Arc::new(HttpAuthorityClient::new(
        &config.authority.base_url,
        config.authority.timeout(),
    )?);
    let forward_service = Arc::new(ForwardService::new(authority));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(forward_service)).await?;

    tracing::info!("Server exited");
    Ok(())
}
