//! # japi-core: Foundational Types for the JSON:API Gateway
//!
//! Shared vocabulary for the classifier (`japi-schema`), the gateway
//! (`japi-api`) and the verification CLI (`japi-cli`).
//!
//! ## Contents
//!
//! - [`protocol`]: media type, content type and protocol version constants.
//! - [`status`]: conversion of error-object `status` members to HTTP codes,
//!   derivation of an error document's status, and client/server range checks.
//! - [`error_code`]: the document engine's error-code catalog
//!   (`JA000`–`JA102` and the SQLSTATE codes it maps).
//! - [`document`]: typed error documents, serialized in canonical member
//!   order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `japi-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod error_code;
pub mod protocol;
pub mod status;

pub use document::{ErrorDocument, ErrorObject, JsonApiObject, Links};
pub use error::StatusCodeError;
pub use error_code::{ErrorCode, ERROR_CODES};
pub use protocol::{CONTENT_TYPE, ERROR_DOCUMENT_PREFIX, JSONAPI_VERSION, MEDIA_TYPE};
pub use status::{
    document_status, is_client_error, is_server_error, parse_status, HttpStatusErrorCode,
};
