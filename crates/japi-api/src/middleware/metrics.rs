//! # Request Metrics
//!
//! In-process atomic counters, readable from tests and handlers, plus
//! `metrics` crate counters exported through Prometheus at `/metrics`.
//!
//! Counters are keyed on the [`Outcome`] the gateway attaches to each
//! response, so an engine-reported 404 and a request for an unknown route
//! are never confused.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::gateway::Outcome;

/// Shared metrics state.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub engine_error_count: Arc<AtomicU64>,
    pub fault_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests answered by the documents router.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Responses carrying an engine-reported error document.
    pub fn engine_errors(&self) -> u64 {
        self.engine_error_count.load(Ordering::Relaxed)
    }

    /// Responses carrying a synthesized fault document.
    pub fn faults(&self) -> u64 {
        self.fault_count.load(Ordering::Relaxed)
    }

    fn record(&self, method: &str, status: u16, outcome: Option<Outcome>) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Some(Outcome::StatusFromErrors) => {
                self.engine_error_count.fetch_add(1, Ordering::Relaxed);
            }
            Some(Outcome::StatusFault) => {
                self.fault_count.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }

        let outcome = outcome.map_or("none", Outcome::as_str);
        ::metrics::counter!(
            "japi_requests_total",
            "method" => method.to_string(),
            "status" => status.to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }
}

/// Middleware that records every response.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().clone();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let outcome = response.extensions().get::<Outcome>().copied();
        m.record(method.as_str(), response.status().as_u16(), outcome);
    }

    response
}
