use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::credential::service::CredentialService;
use auth_service::domain::record::service::RecordService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::catalogue::HttpCatalogueClient;
use auth_service::outbound::database::connect_with_retry;
use auth_service::outbound::database::run_migrations;
use auth_service::outbound::repositories::PostgresCredentialRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_host = %config.database.host,
        database_name = %config.database.name,
        http_port = config.server.http_port,
        catalogue_url = %config.catalogue.base_url,
        "Configuration loaded"
    );

    let pg_pool = connect_with_retry(&config.database, &config.startup.retry_policy()).await?;
    run_migrations(&pg_pool).await?;

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let credential_repository = Arc::new(PostgresCredentialRepository::new(pg_pool));
    let catalogue = Arc::new(HttpCatalogueClient::new(
        &config.catalogue.base_url,
        config.catalogue.timeout(),
    )?);

    let credential_service = Arc::new(CredentialService::new(
        credential_repository,
        Arc::clone(&authenticator),
    ));
    let record_service = Arc::new(RecordService::new(catalogue, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(
        http_listener,
        create_router(credential_service, record_service),
    )
    .await?;

    tracing::info!("Server exited");
    Ok(())
}
