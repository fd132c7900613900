use std::sync::Arc;

use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use tokio::sync::RwLock;
use turnstile_adapters::{config::LoginSettings, persistence::MIGRATOR};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("No '{0}' section in the login settings")]
    MissingSettings(&'static str),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool described by the `postgres` settings and runs all pending
/// migrations against it.
///
/// # Returns
/// A configured PgPool ready for use by the Postgres stores
#[tracing::instrument(name = "Configuring PostgreSQL", skip_all)]
pub async fn configure_postgresql(settings: &LoginSettings) -> Result<PgPool, SetupError> {
    let postgres = settings
        .postgres
        .as_ref()
        .ok_or(SetupError::MissingSettings("postgres"))?;

    let pg_pool = get_postgres_pool(postgres.url.expose_secret(), postgres.max_connections).await?;

    MIGRATOR.run(&pg_pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pg_pool)
}

/// Configure and return a shared Redis connection
///
/// The connection is wrapped the way `RedisRateLimiter` expects it.
pub fn configure_redis(
    settings: &LoginSettings,
) -> Result<Arc<RwLock<redis::Connection>>, SetupError> {
    let redis = settings
        .redis
        .as_ref()
        .ok_or(SetupError::MissingSettings("redis"))?;

    let conn = get_redis_client(&redis.host_name)?.get_connection()?;
    Ok(Arc::new(RwLock::new(conn)))
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Create a Redis client for `redis_hostname`
pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
