//! # Engine Error-Code Catalog
//!
//! The document engine reports failures with a five-character code in each
//! error object's `code` member. Codes are either its own `JA` family or the
//! PostgreSQL SQLSTATE that surfaced while executing the request. Every code
//! maps to an HTTP status and a default human-readable message.
//!
//! Lookups of codes outside the catalog fall back to [`ErrorCode::GENERIC`]
//! (`JA000`), as the engine does.

use crate::document::ErrorObject;
use crate::status::HttpStatusErrorCode;

use HttpStatusErrorCode::{BadRequest, Conflict, Forbidden, InternalServerError, NotFound};

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Five-character code as it appears in the `code` member.
    pub code: &'static str,
    /// HTTP status the engine assigns to this code.
    pub status: HttpStatusErrorCode,
    /// Default message used when the engine has no specific detail.
    pub message: &'static str,
}

const fn entry(code: &'static str, status: HttpStatusErrorCode, message: &'static str) -> ErrorCode {
    ErrorCode {
        code,
        status,
        message,
    }
}

const RETRY_LATER: &str = "The operation cannot be executed right now. Please try again later.";

/// The full catalog, in engine order.
pub static ERROR_CODES: &[ErrorCode] = &[
    // Generic and per-status defaults.
    entry("JA000", BadRequest, "System error JA000. Please contact technical support."),
    entry("JA001", NotFound, "System error JA001: resource does not exist. Please contact technical support."),
    entry("JA002", Forbidden, "System error JA002: request not supported. Please contact technical support."),
    entry("JA003", Conflict, "System error JA003: access conflict. Please contact technical support."),
    entry("JA004", InternalServerError, "System error JA004: internal server error. Please contact technical support."),
    entry("JA005", InternalServerError, "System error JA005: internal database error. Please contact technical support."),
    entry("JA006", InternalServerError, "System error JA006: internal database error. Please contact technical support."),
    // Request and configuration errors.
    entry("JA010", BadRequest, "System error JA010: invalid arguments. Please contact technical support."),
    entry("JA011", BadRequest, "System error JA011: invalid request. Please contact technical support."),
    entry("JA012", BadRequest, "System error JA012: invalid method. Please contact technical support."),
    entry("JA013", BadRequest, "System error JA013: invalid request path. Please contact technical support."),
    entry("JA014", BadRequest, "System error JA014: incomplete request. Please contact technical support."),
    entry("JA015", NotFound, "System error JA015: resource does not exist. Please contact technical support."),
    entry("JA016", InternalServerError, "System error JA016: inconsistent data. Please contact technical support."),
    entry("JA017", InternalServerError, "System error JA017: invalid configuration. Please contact technical support."),
    entry("JA018", InternalServerError, "System error JA018: invalid request. Please contact technical support."),
    entry("JA019", BadRequest, "System error JA019: too many results in the top-level response. Please use fewer items per page."),
    entry("JA020", BadRequest, "System error JA020: too many results in included relationships. Please use fewer items per page."),
    // Request filters.
    entry("JA101", BadRequest, "Invalid text in one of the fields."),
    entry("JA102", BadRequest, "Invalid text in one of the fields."),
    // Class 23: integrity constraint violation.
    entry("23000", BadRequest, "Constraint error on a related table."),
    entry("23001", BadRequest, "The value is not valid for the field."),
    entry("23502", BadRequest, "The field cannot be empty."),
    entry("23503", BadRequest, "Constraint error on a related table."),
    entry("23505", BadRequest, "The value already exists in the table."),
    entry("23514", BadRequest, "The value does not satisfy the validation rules."),
    // Class P0: PL/pgSQL error.
    entry("P0000", InternalServerError, "System error P0000: internal database error. Please contact technical support."),
    entry("P0001", InternalServerError, "System error P0001: internal database error. Please contact technical support."),
    entry("P0002", NotFound, "No data found."),
    entry("P0003", InternalServerError, "Duplicate data found."),
    // Class 57: operator intervention.
    entry("57000", InternalServerError, RETRY_LATER),
    entry("57014", InternalServerError, RETRY_LATER),
    entry("57P01", InternalServerError, RETRY_LATER),
    entry("57P02", InternalServerError, RETRY_LATER),
    entry("57P03", InternalServerError, RETRY_LATER),
    entry("57P04", InternalServerError, RETRY_LATER),
];

impl ErrorCode {
    /// Catch-all entry used for codes outside the catalog.
    pub const GENERIC: ErrorCode = entry("JA000", BadRequest, "System error JA000. Please contact technical support.");
    pub const NOT_FOUND: &'static str = "JA001";
    pub const INTERNAL: &'static str = "JA004";
    pub const INVALID_REQUEST: &'static str = "JA011";
    pub const INVALID_METHOD: &'static str = "JA012";

    /// Find the catalog entry for `code`, if the catalog knows it.
    pub fn find(code: &str) -> Option<&'static ErrorCode> {
        ERROR_CODES.iter().find(|e| e.code == code)
    }

    /// Catalog entry for `code`, falling back to [`ErrorCode::GENERIC`].
    pub fn lookup(code: &str) -> ErrorCode {
        Self::find(code).copied().unwrap_or(Self::GENERIC)
    }

    /// Build an error object carrying this code, its status and default message.
    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject::new(self.status.as_status_member())
            .with_code(self.code)
            .with_detail(self.message)
    }
}
