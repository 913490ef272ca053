use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::outbound::database::RetryPolicy;

/// Application configuration for catalogue-service.
///
/// Development defaults (local use only, override everything in production):
///
/// | Key | Default | Extra override |
/// |---|---|---|
/// | `database.host` | `postgres` | `PGHOST` |
/// | `database.port` | `5432` | |
/// | `database.user` | `admin` | `PGUSER` |
/// | `database.password` | `admin` | `PGPASSWORD` |
/// | `database.name` | `movieApp` | `PGDATABASE` |
/// | `database.max_connections` | `5` | |
/// | `server.http_port` | `5001` | |
/// | `startup.max_attempts` | `10` | |
/// | `startup.initial_backoff_ms` | `500` | |
/// | `startup.max_backoff_ms` | `8000` | |
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub startup: StartupConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Connection options for the configured database.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Store initialization retry settings.
#[derive(Debug, Deserialize, Clone)]
pub struct StartupConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl StartupConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. `PGHOST`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`
    /// 2. Environment variables (DATABASE__HOST, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in development defaults
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.host", "postgres")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "admin")?
            .set_default("database.password", "admin")?
            .set_default("database.name", "movieApp")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 5001)?
            .set_default("startup.max_attempts", 10)?
            .set_default("startup.initial_backoff_ms", 500)?
            .set_default("startup.max_backoff_ms", 8000)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__HOST=db overrides database.host
            .add_source(Environment::default().separator("__").try_parsing(true))
            // Container deployment variables
            .set_override_option("database.host", env::var("PGHOST").ok())?
            .set_override_option("database.user", env::var("PGUSER").ok())?
            .set_override_option("database.password", env::var("PGPASSWORD").ok())?
            .set_override_option("database.name", env::var("PGDATABASE").ok())?
            .build()?;

        configuration.try_deserialize()
    }
}
