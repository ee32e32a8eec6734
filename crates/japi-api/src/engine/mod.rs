//! # Document Engine Interface
//!
//! The gateway never builds protocol content itself. Every request is handed
//! to a [`DocumentEngine`], which returns one JSON:API document as text: a
//! data document, or an error document whose first member is `errors`.
//!
//! ## Implementations
//!
//! - [`postgres::PgEngine`]: calls the database-resident `jsonapi()`
//!   function through an `sqlx` connection pool.
//! - [`fixture::FixtureEngine`]: serves canned documents from memory or a
//!   directory, for development and tests.
//! - [`UnconfiguredEngine`]: fails every call; used when neither of the
//!   above is configured so that every request takes the fault path.
//!
//! Implementations are shared across concurrent requests behind an `Arc`
//! and must be `Send + Sync`. The trait is object-safe so the engine can be
//! chosen at startup.

pub mod fixture;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use fixture::{FixtureEngine, FixtureError};
pub use postgres::PgEngine;

/// One inbound request, reduced to what the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    /// HTTP method name (`GET`, `POST`, `PUT`, `PATCH`, `DELETE`).
    pub method: String,
    /// Request URL as received: path plus query string.
    pub url: String,
    /// Raw request body; empty when the request has none.
    pub body: String,
}

impl EngineRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: body.into(),
        }
    }

    /// The URL path without its query string.
    pub fn path(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(path, _)| path)
    }
}

/// Failures of the engine call itself.
///
/// The `Display` text of these errors becomes the `code` of the fault
/// document, so it carries the underlying message without decoration
/// where one exists.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Database or connection failure.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// The engine ran but produced no document.
    #[error("document engine returned no document")]
    NoDocument,

    /// No engine is configured.
    #[error("document engine is not configured")]
    NotConfigured,

    /// The engine could not serialize a document it produced.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other engine failure, carried as its message.
    #[error("{0}")]
    Failed(String),
}

/// An external component that turns a request into a JSON:API document.
#[async_trait]
pub trait DocumentEngine: Send + Sync {
    /// Produce the document for one request.
    ///
    /// Called exactly once per request; the gateway never retries.
    async fn execute(&self, request: &EngineRequest) -> Result<String, EngineError>;

    /// Check that the engine can currently serve requests.
    async fn health_check(&self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Human-readable name of this implementation, for logs.
    fn engine_name(&self) -> &str;
}

/// Engine used when nothing is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredEngine;

#[async_trait]
impl DocumentEngine for UnconfiguredEngine {
    async fn execute(&self, _request: &EngineRequest) -> Result<String, EngineError> {
        Err(EngineError::NotConfigured)
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        Err(EngineError::NotConfigured)
    }

    fn engine_name(&self) -> &str {
        "unconfigured"
    }
}
