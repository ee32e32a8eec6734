//! # Route Modules
//!
//! - [`documents`]: every other path, forwarded to the document engine.
//! - [`health`]: liveness/readiness probes and the Prometheus endpoint.
//!   These paths are reserved and never reach the engine.
//!
//! Both route every unsupported method to [`method_not_allowed`], so a 405
//! is still an error document.

pub mod documents;
pub mod health;

use axum::http::{Method, Uri};
use japi_core::ErrorCode;

use crate::gateway::{rejection_with_status, GatewayResponse};

/// `JA012` 405 document for a method the route does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> GatewayResponse {
    rejection_with_status(
        405,
        ErrorCode::INVALID_METHOD,
        &format!("method {method} is not supported"),
        &uri.to_string(),
    )
}
