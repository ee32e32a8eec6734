//! # japi-api: JSON:API Gateway
//!
//! HTTP front end for a document engine that produces complete JSON:API
//! documents. The gateway forwards each request to the engine, derives the
//! HTTP status from the returned document, and passes the document through
//! unchanged. Engine failures never reach the client raw: they become a
//! synthesized 500 error document.
//!
//! ## API Surface
//!
//! | Path | Module | Purpose |
//! |---|---|---|
//! | `/health/liveness`, `/health/readiness` | [`routes::health`] | Probes |
//! | `/metrics` | [`routes::health`] | Prometheus scrape |
//! | everything else | [`routes::documents`] | Forwarded to the engine |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → body limit → Handler
//! ```
//!
//! Every document response carries `application/vnd.api+json; charset=utf-8`.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::Router;

pub use config::AppConfig;
pub use error::GatewayError;
pub use gateway::{Gateway, GatewayResponse, Outcome};
pub use state::AppState;

use crate::middleware::metrics::ApiMetrics;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Assemble the application router, recording into `metrics`.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let documents = routes::documents::router()
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics));

    Router::new()
        .merge(routes::health::router())
        .merge(documents)
        .with_state(state)
}
