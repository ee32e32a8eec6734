//! # HTTP Status Handling
//!
//! Error objects carry their HTTP status as a string. The document engine
//! writes either the bare code (`"409"`) or the code followed by its reason
//! phrase (`"404 Not Found"`); both convert to the leading decimal number.

use std::fmt;

use serde_json::Value;

use crate::error::StatusCodeError;

/// HTTP statuses the document engine assigns to the errors it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpStatusErrorCode {
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    InternalServerError,
}

impl HttpStatusErrorCode {
    /// The numeric HTTP status code.
    pub fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
        }
    }

    /// The canonical reason phrase.
    pub fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::Conflict => "Conflict",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    /// Map a numeric code to a known variant. Unknown codes map to
    /// `InternalServerError`, matching how the engine renders them.
    pub fn from_code(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::InternalServerError,
        }
    }

    /// The code as the string carried in an error object's `status` member.
    pub fn as_status_member(self) -> String {
        self.code().to_string()
    }
}

impl fmt::Display for HttpStatusErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// True for statuses in the client error range (400–499).
pub fn is_client_error(code: u16) -> bool {
    (400..=499).contains(&code)
}

/// True for statuses in the server error range (500–599).
pub fn is_server_error(code: u16) -> bool {
    (500..=599).contains(&code)
}

/// Convert an error object's `status` member to an HTTP status code.
///
/// Strings convert through their leading decimal digits; surrounding
/// whitespace before the digits is ignored. Non-negative JSON integers are
/// accepted as-is. Anything else is rejected, as are informational codes
/// (below 200), which cannot be sent as a final response.
pub fn parse_status(value: &Value) -> Result<u16, StatusCodeError> {
    let code = match value {
        Value::String(s) => leading_number(s).ok_or_else(|| StatusCodeError::NotNumeric {
            value: value.to_string(),
        })?,
        Value::Number(n) => n.as_u64().ok_or_else(|| StatusCodeError::NotNumeric {
            value: value.to_string(),
        })?,
        other => {
            return Err(StatusCodeError::NotNumeric {
                value: other.to_string(),
            })
        }
    };
    if !(200..=999).contains(&code) {
        return Err(StatusCodeError::OutOfRange(code));
    }
    // Range-checked above.
    Ok(code as u16)
}

/// HTTP status for an error document: the highest status among its error
/// objects.
///
/// Every error object must carry a convertible `status`; a document whose
/// `errors` member is absent, not an array, or empty has no status.
pub fn document_status(document: &Value) -> Result<u16, StatusCodeError> {
    let errors = document
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
        .ok_or(StatusCodeError::NoErrors)?;
    let mut worst = 0;
    for (index, error) in errors.iter().enumerate() {
        let status = error
            .get("status")
            .ok_or(StatusCodeError::Missing { index })?;
        worst = worst.max(parse_status(status)?);
    }
    Ok(worst)
}

/// Leading decimal digits of `s`, saturating instead of overflowing.
fn leading_number(s: &str) -> Option<u64> {
    let digits: &str = {
        let trimmed = s.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    if digits.is_empty() {
        return None;
    }
    Some(digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    }))
}
