//! # Gateway Adapter
//!
//! Turns one request into one response by delegating to the configured
//! [`DocumentEngine`]. The adapter frames the engine's document for HTTP and
//! never re-serializes it:
//!
//! ```text
//! Received → Delegating ─┬─ error document ─→ StatusFromErrors (max status)
//!                        ├─ data document ──→ StatusOk (200)
//!                        └─ failure ────────→ StatusFault (500 fault document)
//! ```
//!
//! Exactly one engine call is made per request. Any failure is terminal and
//! becomes a synthesized fault document; the raw failure only ever reaches
//! the client as that document's `code`.

use std::fmt;
use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use japi_core::{
    document_status, is_client_error, is_server_error, ErrorCode, ErrorDocument, CONTENT_TYPE,
    ERROR_DOCUMENT_PREFIX,
};

use crate::engine::{DocumentEngine, EngineRequest};
use crate::error::GatewayError;

/// Served when a fault document cannot be serialized.
const FALLBACK_FAULT: &str =
    r#"{"errors":[{"status":"500","code":"JA004"}],"jsonapi":{"version":"1.0"}}"#;

/// How a response status was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The engine returned an error document; status is its highest status.
    StatusFromErrors,
    /// The engine returned a data or meta document.
    StatusOk,
    /// The engine call failed; the body is a synthesized fault document.
    StatusFault,
    /// The request was refused before reaching the engine.
    Rejected,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusFromErrors => "status_from_errors",
            Self::StatusOk => "status_ok",
            Self::StatusFault => "status_fault",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A framed response: status, document text and how the status was reached.
///
/// Converts into an HTTP response carrying the JSON:API content type. The
/// [`Outcome`] is attached to the response extensions for middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
    pub outcome: Outcome,
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
        response.extensions_mut().insert(self.outcome);
        response
    }
}

/// The adapter. Cheap to clone; clones share the engine.
#[derive(Clone)]
pub struct Gateway {
    engine: Arc<dyn DocumentEngine>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("engine", &self.engine.engine_name())
            .finish()
    }
}

impl Gateway {
    pub fn new(engine: Arc<dyn DocumentEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<dyn DocumentEngine> {
        &self.engine
    }

    /// Call the engine once and interpret its document.
    pub async fn delegate(&self, request: &EngineRequest) -> Result<GatewayResponse, GatewayError> {
        let document = self.engine.execute(request).await?;
        interpret(document)
    }

    /// Handle one request end to end. Never fails: delegation faults become
    /// 500 fault documents.
    pub async fn handle(&self, request: &EngineRequest) -> GatewayResponse {
        respond(self.delegate(request).await, &request.url)
    }
}

/// Frame an engine document.
///
/// A document starting with `{"errors":` gets the highest status among its
/// error objects; anything else gets 200. The body is the document text
/// unchanged.
pub fn interpret(document: String) -> Result<GatewayResponse, GatewayError> {
    if document.starts_with(ERROR_DOCUMENT_PREFIX) {
        let value: serde_json::Value =
            serde_json::from_str(&document).map_err(GatewayError::MalformedDocument)?;
        let status = document_status(&value)?;
        return Ok(GatewayResponse {
            status,
            body: document,
            outcome: Outcome::StatusFromErrors,
        });
    }
    serde_json::from_str::<serde::de::IgnoredAny>(&document)
        .map_err(GatewayError::MalformedDocument)?;
    Ok(GatewayResponse {
        status: 200,
        body: document,
        outcome: Outcome::StatusOk,
    })
}

/// Resolve a delegation result into a response, logging the outcome.
pub fn respond(result: Result<GatewayResponse, GatewayError>, url: &str) -> GatewayResponse {
    match result {
        Ok(response) => {
            if response.outcome == Outcome::StatusFromErrors {
                if is_server_error(response.status) {
                    tracing::warn!(url, status = response.status, "engine reported server error");
                } else if is_client_error(response.status) {
                    tracing::info!(url, status = response.status, "engine reported error");
                } else {
                    tracing::debug!(url, status = response.status, "engine reported error");
                }
            }
            response
        }
        Err(err) => {
            tracing::error!(url, kind = err.kind(), error = %err, "delegation fault");
            fault_response(&err, url)
        }
    }
}

/// The 500 fault document standing in for a failed delegation.
pub fn fault_response(error: &GatewayError, url: &str) -> GatewayResponse {
    let body = ErrorDocument::fault(error.to_string(), url)
        .to_json()
        .unwrap_or_else(|_| FALLBACK_FAULT.to_string());
    GatewayResponse {
        status: 500,
        body,
        outcome: Outcome::StatusFault,
    }
}

/// An error document for a request refused before delegation, built from
/// the catalog entry for `code`.
pub fn rejection_response(code: &str, detail: &str, url: &str) -> GatewayResponse {
    let entry = ErrorCode::lookup(code);
    rejection_with_status(entry.status.code(), code, detail, url)
}

/// Like [`rejection_response`], with an explicit HTTP status that is also
/// written into the error object. The status's reason phrase is the title.
pub fn rejection_with_status(status: u16, code: &str, detail: &str, url: &str) -> GatewayResponse {
    let mut error = ErrorCode::lookup(code).to_error_object().with_detail(detail);
    error.status = status.to_string();
    if let Some(reason) = StatusCode::from_u16(status).ok().and_then(|s| s.canonical_reason()) {
        error = error.with_title(reason);
    }
    let body = ErrorDocument::new(vec![error], url)
        .to_json()
        .unwrap_or_else(|_| FALLBACK_FAULT.to_string());
    GatewayResponse {
        status,
        body,
        outcome: Outcome::Rejected,
    }
}
