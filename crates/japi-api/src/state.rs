//! # Application State
//!
//! Shared state passed to route handlers via the `State` extractor. The only
//! shared resource is the gateway's engine handle; requests are otherwise
//! independent.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::engine::DocumentEngine;
use crate::gateway::Gateway;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Gateway,
    /// Renders `/metrics`; `None` when metrics are disabled.
    pub prometheus: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("gateway", &self.gateway)
            .field("prometheus", &self.prometheus.as_ref().map(|_| "[installed]"))
            .finish()
    }
}

impl AppState {
    pub fn new(config: AppConfig, engine: Arc<dyn DocumentEngine>) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Gateway::new(engine),
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
