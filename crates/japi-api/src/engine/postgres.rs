//! # PostgreSQL Document Engine
//!
//! The production engine lives inside the database as the `jsonapi()`
//! function. Each request becomes one call:
//!
//! ```sql
//! SELECT jsonapi(method, url, body, user_id, company_id)::text
//! ```
//!
//! All arguments are bound parameters. `user_id` and `company_id` scope the
//! request inside the engine and come from configuration; both default to
//! empty strings.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DocumentEngine, EngineError, EngineRequest};

const ENGINE_QUERY: &str = "SELECT jsonapi($1, $2, $3, $4, $5)::text";

/// Engine backed by the database `jsonapi()` function.
#[derive(Debug, Clone)]
pub struct PgEngine {
    pool: PgPool,
    user_id: String,
    company_id: String,
}

impl PgEngine {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            user_id: String::new(),
            company_id: String::new(),
        }
    }

    /// Scope every engine call to the given user and company.
    pub fn with_scope(mut self, user_id: impl Into<String>, company_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.company_id = company_id.into();
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentEngine for PgEngine {
    async fn execute(&self, request: &EngineRequest) -> Result<String, EngineError> {
        let document: Option<String> = sqlx::query_scalar(ENGINE_QUERY)
            .bind(&request.method)
            .bind(&request.url)
            .bind(&request.body)
            .bind(&self.user_id)
            .bind(&self.company_id)
            .fetch_one(&self.pool)
            .await?;
        document.ok_or(EngineError::NoDocument)
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_binds_every_argument() {
        for n in 1..=5 {
            assert!(ENGINE_QUERY.contains(&format!("${n}")));
        }
        assert!(ENGINE_QUERY.ends_with("::text"));
    }

    #[tokio::test]
    async fn scope_defaults_to_empty() {
        // connect_lazy never touches the network.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/japi")
            .unwrap();
        let engine = PgEngine::new(pool.clone());
        assert_eq!(engine.user_id, "");
        assert_eq!(engine.company_id, "");

        let engine = PgEngine::new(pool).with_scope("u1", "c1");
        assert_eq!(engine.user_id, "u1");
        assert_eq!(engine.company_id, "c1");
        assert_eq!(engine.engine_name(), "postgres");
    }
}
