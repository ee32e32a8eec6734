//! # Operational Routes
//!
//! Kubernetes probes and the Prometheus scrape endpoint. GET only; other
//! methods get the 405 error document.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::routes::method_not_allowed;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness).fallback(method_not_allowed))
        .route("/health/readiness", get(readiness).fallback(method_not_allowed))
        .route("/metrics", get(render_metrics).fallback(method_not_allowed))
}

/// Liveness probe: always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 when the document engine passes its health check.
async fn readiness(State(state): State<AppState>) -> Response {
    let engine = state.gateway.engine();
    match engine.health_check().await {
        Ok(()) => "ready".into_response(),
        Err(err) => {
            tracing::warn!(engine = engine.engine_name(), error = %err, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "document engine unavailable").into_response()
        }
    }
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.prometheus {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
