use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for api-gateway.
///
/// Development defaults (local use only, override everything in production):
///
/// | Key | Default | Extra override |
/// |---|---|---|
/// | `server.http_port` | `8080` | |
/// | `authority.base_url` | `http://auth:5000` | `AUTH_SERVICE_URL` |
/// | `authority.timeout_secs` | `10` | |
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub authority: AuthorityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Authentication authority client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthorityConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AuthorityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. `AUTH_SERVICE_URL`
    /// 2. Environment variables (SERVER__HTTP_PORT, AUTHORITY__BASE_URL, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in development defaults
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("authority.base_url", "http://auth:5000")?
            .set_default("authority.timeout_secs", 10)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            .add_source(Environment::default().separator("__").try_parsing(true))
            .set_override_option("authority.base_url", env::var("AUTH_SERVICE_URL").ok())?
            .build()?;

        configuration.try_deserialize()
    }
}
