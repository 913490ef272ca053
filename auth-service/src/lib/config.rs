use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::outbound::database::RetryPolicy;

/// Signing secret used when nothing else is configured. Refused in production.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-only-jwt-secret-change-me";

/// Application configuration for auth-service.
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
/// | `server.http_port` | `5000` | |
/// | `jwt.secret` | [`DEVELOPMENT_JWT_SECRET`] | `JWT_SECRET` |
/// | `catalogue.base_url` | `http://catalogue:5001` | `CATALOGUE_SERVICE_URL` |
/// | `catalogue.timeout_secs` | `10` | |
/// | `startup.max_attempts` | `10` | |
/// | `startup.initial_backoff_ms` | `500` | |
/// | `startup.max_backoff_ms` | `8000` | |
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub catalogue: CatalogueConfig,
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
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// Every authority process must share the same secret; changing it
/// invalidates all tokens issued before the change.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Catalogue (resource service) client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogueConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl CatalogueConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
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
    /// 1. `PGHOST`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`, `JWT_SECRET`, `CATALOGUE_SERVICE_URL`
    /// 2. Environment variables (DATABASE__HOST, JWT__SECRET, CATALOGUE__BASE_URL, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in development defaults
    ///
    /// # Errors
    /// Returns error if configuration values are invalid, or if the signing
    /// secret is empty or the development one while `RUN_MODE=production`
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.host", "postgres")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "admin")?
            .set_default("database.password", "admin")?
            .set_default("database.name", "movieApp")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 5000)?
            .set_default("jwt.secret", DEVELOPMENT_JWT_SECRET)?
            .set_default("catalogue.base_url", "http://catalogue:5001")?
            .set_default("catalogue.timeout_secs", 10)?
            .set_default("startup.max_attempts", 10)?
            .set_default("startup.initial_backoff_ms", 500)?
            .set_default("startup.max_backoff_ms", 8000)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            // Container deployment variables
            .set_override_option("database.host", env::var("PGHOST").ok())?
            .set_override_option("database.user", env::var("PGUSER").ok())?
            .set_override_option("database.password", env::var("PGPASSWORD").ok())?
            .set_override_option("database.name", env::var("PGDATABASE").ok())?
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("catalogue.base_url", env::var("CATALOGUE_SERVICE_URL").ok())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate_for(&run_mode)?;
        Ok(config)
    }

    /// Reject development-only settings outside development.
    pub fn validate_for(&self, run_mode: &str) -> Result<(), ConfigError> {
        if run_mode != "production" {
            return Ok(());
        }

        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set in production".to_string(),
            ));
        }

        if self.jwt.secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret still holds the development default".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                host: "postgres".to_string(),
                port: 5432,
                user: "admin".to_string(),
                password: "admin".to_string(),
                name: "movieApp".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 5000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
            },
            catalogue: CatalogueConfig {
                base_url: "http://catalogue:5001".to_string(),
                timeout_secs: 10,
            },
            startup: StartupConfig {
                max_attempts: 10,
                initial_backoff_ms: 500,
                max_backoff_ms: 8000,
            },
        }
    }

    #[test]
    fn test_development_secret_allowed_in_development() {
        let config = config_with_secret(DEVELOPMENT_JWT_SECRET);
        assert!(config.validate_for("development").is_ok());
    }

    #[test]
    fn test_development_secret_refused_in_production() {
        let config = config_with_secret(DEVELOPMENT_JWT_SECRET);
        assert!(config.validate_for("production").is_err());
    }

    #[test]
    fn test_empty_secret_refused_in_production() {
        let config = config_with_secret("  ");
        assert!(config.validate_for("production").is_err());
    }

    #[test]
    fn test_real_secret_accepted_in_production() {
        let config = config_with_secret("3c1f0e0a9b7d4e21a8f6c2d5b9e7a1f4");
        assert!(config.validate_for("production").is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config_with_secret("super-secret-value");
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }
}
