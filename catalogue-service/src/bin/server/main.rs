use std::sync::Arc;

use catalogue_service::config::Config;
use catalogue_service::domain::record::service::RecordService;
use catalogue_service::inbound::http::router::create_router;
use catalogue_service::outbound::database::connect_with_retry;
use catalogue_service::outbound::database::run_migrations;
use catalogue_service::outbound::repositories::PostgresRecordRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalogue_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalogue-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_host = %config.database.host,
        database_name = %config.database.name,
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let pg_pool = connect_with_retry(&config.database, &config.startup.retry_policy()).await?;
    run_migrations(&pg_pool).await?;

    let record_repository = Arc::new(PostgresRecordRepository::new(pg_pool));
    let record_service = Arc::new(RecordService::new(record_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(record_service)).await?;

    tracing::info!("Server exited");
    Ok(())
}
