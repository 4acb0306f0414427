//! Database connection pool management.
//!
//! Startup goes through [`connect_with_retry`], which keeps trying to open the
//! pool while the database is still coming up. After that, request handlers
//! borrow connections with [`Database::acquire`]. A borrowed connection goes
//! back to the pool when it is dropped, so every exit path releases it.

use crate::config::DatabaseConfig;
use ballot_core::{RetryError, Sleep};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres};
use std::future::Future;
use std::time::Duration;

/// Type alias for the database pool.
pub type Pool = PgPool;

/// Handle to the shared connection pool.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Borrow one connection exclusively.
    ///
    /// Waits up to the configured acquire timeout when every connection is in
    /// use, then fails with [`sqlx::Error::PoolTimedOut`].
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Close the pool, waiting for borrowed connections to come back.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// Connection options for the configured endpoint.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password)
}

/// Create a new database connection pool with a single attempt.
pub async fn create_pool(config: &DatabaseConfig) -> Result<Database, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options(config))
        .await?;

    Ok(Database::from_pool(pool))
}

/// Create the pool, retrying transient failures per the configured policy.
///
/// Returns the last error once the attempt bound is reached; the caller is
/// expected to abort startup.
pub async fn connect_with_retry<S: Sleep>(
    config: &DatabaseConfig,
    sleeper: &S,
) -> Result<Database, RetryError<sqlx::Error>> {
    let policy = config.retry_policy();
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        max_attempts = policy.max_attempts(),
        "Initializing database connection pool..."
    );

    let db = policy
        .run(sleeper, is_transient, |attempt| async move {
            tracing::debug!(attempt, "Connecting to database");
            create_pool(config).await
        })
        .await?;

    tracing::info!("Database connection pool initialized successfully");
    Ok(db)
}

/// Whether a connect error is worth retrying.
///
/// Covers network and TLS failures, pool timeouts, and the SQLSTATE codes a
/// server reports while it is starting or saturated.
pub fn is_transient(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|c| c.starts_with("08") || c == "57P03" || c == "53300")
            .unwrap_or(false),
        _ => false,
    }
}

/// Run database migrations.
pub async fn run_migrations(db: &Database) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Initializing database schema...");
    sqlx::migrate!("./migrations").run(db.pool()).await?;
    tracing::info!("Database schema initialized successfully");
    Ok(())
}

/// [`Sleep`] backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

impl Sleep for TokioSleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
