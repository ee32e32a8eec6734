//! # Document Routes
//!
//! Catch-all passthrough to the document engine. Every path (apart from the
//! reserved operational ones) accepts GET, POST, PUT, PATCH and DELETE; the
//! method, the URL as received (path plus query) and the raw body are
//! handed to the gateway unchanged.
//!
//! The engine call is bounded by the configured request timeout. Expiry is
//! a delegation fault like any other.

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::routing::{get, MethodRouter};
use axum::Router;
use uuid::Uuid;

use crate::engine::EngineRequest;
use crate::error::GatewayError;
use crate::extractors::RawBody;
use crate::gateway::{self, GatewayResponse};
use crate::routes::method_not_allowed;
use crate::state::AppState;

/// Build the document router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", document_methods())
        .route("/{*path}", document_methods())
}

fn document_methods() -> MethodRouter<AppState> {
    get(handle_document)
        .post(handle_document)
        .put(handle_document)
        .patch(handle_document)
        .delete(handle_document)
        .fallback(method_not_allowed)
}

/// Forward one request to the engine and frame its document.
#[tracing::instrument(
    skip_all,
    fields(request_id = %Uuid::new_v4(), method = %method, url = %uri)
)]
async fn handle_document(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    RawBody(body): RawBody,
) -> GatewayResponse {
    let request = EngineRequest::new(method.as_str(), uri.to_string(), body);
    let limit = state.config.request_timeout;

    let result = if limit.is_zero() {
        state.gateway.delegate(&request).await
    } else {
        match tokio::time::timeout(limit, state.gateway.delegate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout(limit)),
        }
    };

    let response = gateway::respond(result, &request.url);
    tracing::debug!(status = response.status, outcome = %response.outcome, "responded");
    response
}
