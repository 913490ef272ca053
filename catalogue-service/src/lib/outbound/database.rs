//! Store initialization: bounded connection retries and schema migrations.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database unavailable after {attempts} attempts: {last_error}")]
    DatabaseUnavailable { attempts: u32, last_error: String },

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Exponential backoff with a hard attempt limit.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based), doubling up to `max_backoff`.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Run `attempt_fn` until it succeeds or `max_attempts` is reached.
    ///
    /// # Errors
    /// * `DatabaseUnavailable` - Every attempt failed; carries the last failure
    pub async fn retry<T, E, F, Fut>(
        &self,
        operation: &str,
        mut attempt_fn: F,
    ) -> Result<T, StartupError>
    where
        E: std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!(operation, attempts = attempt, error = %e, "Giving up");
                    return Err(StartupError::DatabaseUnavailable {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.backoff_after(attempt);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts,
                        retry_in_ms = delay.as_millis() as u64,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Open the connection pool, retrying while the database comes up.
pub async fn connect_with_retry(
    config: &DatabaseConfig,
    policy: &RetryPolicy,
) -> Result<PgPool, StartupError> {
    let pool_options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5));
    let connect_options = config.connect_options();

    let pool = policy
        .retry("database connection", || {
            pool_options.clone().connect_with(connect_options.clone())
        })
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    Ok(pool)
}

/// Create the `records` table.
///
/// The database may be shared with the authority service, so versions applied
/// by other services are tolerated.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StartupError> {
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(true);
    migrator.run(pool).await?;

    tracing::info!(database = "postgresql", "Database migrations completed");
    Ok(())
}
