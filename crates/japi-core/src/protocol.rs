//! # Protocol Constants
//!
//! Fixed strings of the JSON:API wire protocol as spoken by the gateway.

/// The JSON:API media type.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Content type sent on every gateway response, success or failure.
pub const CONTENT_TYPE: &str = "application/vnd.api+json; charset=utf-8";

/// Protocol version advertised in the `jsonapi` member of synthesized documents.
pub const JSONAPI_VERSION: &str = "1.0";

/// Literal prefix of an engine document whose first member is `errors`.
///
/// The gateway only inspects statuses of documents that start with this
/// exact text; any other output is treated as a data document.
pub const ERROR_DOCUMENT_PREFIX: &str = "{\"errors\":";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_extends_media_type() {
        assert!(CONTENT_TYPE.starts_with(MEDIA_TYPE));
        assert!(CONTENT_TYPE.ends_with("charset=utf-8"));
    }

    #[test]
    fn error_prefix_is_an_object_opening() {
        assert!(ERROR_DOCUMENT_PREFIX.starts_with('{'));
        assert!(r#"{"errors":[]}"#.starts_with(ERROR_DOCUMENT_PREFIX));
        assert!(!r#"{ "errors":[]}"#.starts_with(ERROR_DOCUMENT_PREFIX));
    }
}
