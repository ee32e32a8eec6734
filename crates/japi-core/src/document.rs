//! # Typed Error Documents
//!
//! Error documents the gateway itself emits: the fault document that stands
//! in for a failed engine call, and catalog-based errors for requests that
//! never reach the engine.
//!
//! Members serialize in declaration order and absent optional members are
//! skipped, so a fault document renders exactly as
//! `{"errors":[{"status":"500","code":"..."}],"links":{"self":"..."},"jsonapi":{"version":"1.0"}}`.

use serde::Serialize;

use crate::protocol::JSONAPI_VERSION;

/// A top-level `links` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl Links {
    /// Links object with only a `self` member.
    pub fn self_link(url: impl Into<String>) -> Self {
        Self {
            self_link: Some(url.into()),
        }
    }
}

/// The `jsonapi` member describing the server's implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonApiObject {
    pub version: String,
}

impl Default for JsonApiObject {
    fn default() -> Self {
        Self {
            version: JSONAPI_VERSION.to_string(),
        }
    }
}

/// One error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    /// HTTP status, string-encoded.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorObject {
    /// Error object carrying only a status.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            code: None,
            title: None,
            detail: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A top-level error document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<JsonApiObject>,
}

impl ErrorDocument {
    /// Document with the given errors, a `self` link and the protocol version.
    pub fn new(errors: Vec<ErrorObject>, self_url: impl Into<String>) -> Self {
        Self {
            errors,
            links: Some(Links::self_link(self_url)),
            jsonapi: Some(JsonApiObject::default()),
        }
    }

    /// The document that replaces a failed engine call: a single 500 error
    /// whose `code` is the failure message.
    pub fn fault(message: impl Into<String>, self_url: impl Into<String>) -> Self {
        Self::new(vec![ErrorObject::new("500").with_code(message)], self_url)
    }

    /// Serialize to the wire text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
