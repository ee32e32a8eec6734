//! # Engine Bootstrap
//!
//! Chooses the document engine at startup:
//!
//! 1. **Postgres** when a database is configured (`DATABASE_URL` or a `pg`
//!    section).
//! 2. **Fixtures** when a fixtures directory is configured.
//! 3. **Unconfigured** otherwise. The server still starts and answers every
//!    request with a 500 fault document; readiness reports 503.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::engine::{DocumentEngine, FixtureEngine, FixtureError, PgEngine, UnconfiguredEngine};
use crate::state::AppState;

/// Errors during startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("fixture loading failed: {0}")]
    Fixtures(#[from] FixtureError),
}

/// Build the engine named by `config`.
pub async fn engine_from_config(
    config: &AppConfig,
) -> Result<Arc<dyn DocumentEngine>, BootstrapError> {
    if let Some(database) = &config.database {
        let pool = db::init_pool(database).await?;
        let engine = PgEngine::new(pool)
            .with_scope(&config.engine_user_id, &config.engine_company_id);
        return Ok(Arc::new(engine));
    }
    if let Some(dir) = &config.fixtures_dir {
        return Ok(Arc::new(FixtureEngine::from_dir(dir)?));
    }
    tracing::warn!(
        "No document engine configured (set DATABASE_URL or JAPI_FIXTURES_DIR). \
         Every request will return a 500 fault document."
    );
    Ok(Arc::new(UnconfiguredEngine))
}

/// Build the application state for `config`.
pub async fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let engine = engine_from_config(&config).await?;
    tracing::info!(
        engine = engine.engine_name(),
        port = config.port,
        request_timeout_secs = config.request_timeout.as_secs(),
        "document engine ready"
    );
    Ok(AppState::new(config, engine))
}
