//! # Database Connection
//!
//! Connection pool for the Postgres document engine. The gateway owns no
//! tables and runs no migrations; the `jsonapi()` function and its schema
//! are deployed with the database.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Connection options from either the configured URL or the individual
/// parameters.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    if let Some(url) = &config.url {
        return url.parse();
    }
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.dbname)
        .username(&config.user)
        .application_name("japi-api");
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    Ok(options)
}

/// Open the connection pool.
///
/// Fails if the database cannot be reached within the acquire timeout.
pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options(config)?)
        .await?;

    tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL");
    Ok(pool)
}
