//! # Error Types
//!
//! Errors raised by the core protocol operations. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Failure to turn an error object's `status` member into an HTTP status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusCodeError {
    /// The error object has no `status` member.
    #[error("error object at index {index} has no status")]
    Missing {
        /// Position of the error object in the `errors` array.
        index: usize,
    },

    /// The `status` member does not start with a decimal number.
    #[error("status {value:?} is not numeric")]
    NotNumeric {
        /// The offending `status` value, rendered as JSON.
        value: String,
    },

    /// The numeric value lies outside the final-response range 200–999.
    #[error("status {0} is outside the HTTP status range")]
    OutOfRange(u64),

    /// The `errors` member is missing, not an array, or empty.
    #[error("error document carries no error objects")]
    NoErrors,
}
