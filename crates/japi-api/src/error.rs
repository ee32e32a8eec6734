//! # Gateway Error Types
//!
//! Every variant is a delegation fault. None of them reaches the client as
//! is: the gateway replaces each with a synthesized 500 error document whose
//! single error `code` is the variant's `Display` text.

use std::time::Duration;

use japi_core::StatusCodeError;
use thiserror::Error;

use crate::engine::EngineError;

/// Failure to turn one request into an engine-provided document.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The engine call itself failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine returned text that is not JSON.
    #[error("document engine returned malformed output: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    /// The engine returned an error document whose statuses cannot be
    /// converted to an HTTP status.
    #[error("document engine returned an invalid status: {0}")]
    InvalidStatus(#[from] StatusCodeError),

    /// The engine did not answer within the request timeout.
    #[error("document engine timed out after {0:?}")]
    Timeout(Duration),
}

impl GatewayError {
    /// Short machine-readable label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Engine(_) => "engine",
            Self::MalformedDocument(_) => "malformed_document",
            Self::InvalidStatus(_) => "invalid_status",
            Self::Timeout(_) => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_failure_message_passes_through() {
        let err = GatewayError::from(EngineError::Failed("connection refused".into()));
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.kind(), "engine");
    }

    #[test]
    fn invalid_status_message() {
        let err = GatewayError::from(StatusCodeError::NoErrors);
        assert_eq!(
            err.to_string(),
            "document engine returned an invalid status: error document carries no error objects"
        );
    }

    #[test]
    fn timeout_message() {
        let err = GatewayError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "document engine timed out after 30s");
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn malformed_document_message() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = GatewayError::MalformedDocument(source);
        assert!(err
            .to_string()
            .starts_with("document engine returned malformed output: "));
    }
}
