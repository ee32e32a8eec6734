//! # Status Subcommand
//!
//! Reports the HTTP status the gateway would answer with if the engine
//! returned the given document, following the gateway's rules: a document
//! whose text begins with `{"errors":` takes the highest status among its
//! error objects, any other JSON takes 200, and anything unusable is a 500
//! fault. Error objects are explained against the engine's code catalog.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use japi_core::{document_status, parse_status, ErrorCode, ERROR_DOCUMENT_PREFIX};

/// Arguments for the `japi status` subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Document file, as the engine would return it.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// How the gateway would frame a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived {
    /// Not an error document; answered with 200.
    Ok,
    /// Error document; answered with its highest status.
    FromErrors(u16),
    /// Unusable; answered with a 500 fault document carrying this message.
    Fault(String),
}

impl Derived {
    pub fn status(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::FromErrors(status) => *status,
            Self::Fault(_) => 500,
        }
    }
}

/// Derive the response status for raw document text.
pub fn derive(text: &str) -> Derived {
    let doc: Value = match serde_json::from_str(text) {
        Ok(doc) => doc,
        Err(e) => return Derived::Fault(format!("malformed output: {e}")),
    };
    if !text.starts_with(ERROR_DOCUMENT_PREFIX) {
        return Derived::Ok;
    }
    match document_status(&doc) {
        Ok(status) => Derived::FromErrors(status),
        Err(e) => Derived::Fault(format!("invalid status: {e}")),
    }
}

/// Render the full report for one document.
pub fn report(text: &str) -> String {
    let derived = derive(text);
    let mut out = String::new();
    let _ = write!(out, "HTTP {}", derived.status());
    match &derived {
        Derived::Ok => out.push_str(" (document passed through)"),
        Derived::FromErrors(_) => out.push_str(" (highest error status)"),
        Derived::Fault(message) => {
            let _ = write!(out, " (fault: {message})");
        }
    }

    let doc: Option<Value> = serde_json::from_str(text).ok();
    let errors = doc
        .as_ref()
        .and_then(|d| d.get("errors"))
        .and_then(Value::as_array);
    if let Some(errors) = errors {
        if derived == Derived::Ok {
            out.push_str("\n  note: `errors` is not the first member; the gateway treats this as a data document");
        }
        for (i, error) in errors.iter().enumerate() {
            let _ = write!(out, "\n  [{i}] {}", explain_error(error));
        }
    }
    out
}

/// One line describing an error object: its status and its catalog entry.
pub fn explain_error(error: &Value) -> String {
    let status = match error.get("status") {
        Some(raw) => match parse_status(raw) {
            Ok(code) => code.to_string(),
            Err(e) => format!("? ({e})"),
        },
        None => "? (missing)".to_string(),
    };
    match error.get("code").and_then(Value::as_str) {
        Some(code) => match ErrorCode::find(code) {
            Some(entry) => format!("status {status}, {code}: {}", entry.message),
            None => format!("status {status}, {code}: not in catalog"),
        },
        None => format!("status {status}, no code"),
    }
}

/// Execute the status subcommand.
///
/// Returns exit code: 0 when the gateway would pass the document through
/// (including engine-reported errors), 1 when it would fault.
pub fn run_status(args: &StatusArgs) -> Result<u8> {
    let text = crate::read_text(&args.file)?;
    println!("{}", report(&text));
    Ok(u8::from(matches!(derive(&text), Derived::Fault(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_of_error_statuses() {
        let text = r#"{"errors":[{"status":"404"},{"status":"409"}]}"#;
        assert_eq!(derive(text), Derived::FromErrors(409));
    }

    #[test]
    fn data_document_is_ok() {
        assert_eq!(derive(r#"{"data":[]}"#), Derived::Ok);
    }

    #[test]
    fn prefix_is_literal() {
        let text = "{\n  \"errors\": [{\"status\": \"404\"}]\n}";
        assert_eq!(derive(text), Derived::Ok);
        assert!(report(text).contains("not the first member"));
    }

    #[test]
    fn unusable_documents_fault() {
        assert_eq!(derive("nope").status(), 500);
        assert_eq!(derive(r#"{"errors":[]}"#).status(), 500);
    }

    #[test]
    fn errors_are_explained_from_catalog() {
        let text = r#"{"errors":[{"status":"404 Not Found","code":"JA001"},{"status":"409","code":"XX999"}]}"#;
        let out = report(text);
        assert!(out.starts_with("HTTP 409 (highest error status)"));
        assert!(out.contains("[0] status 404, JA001: System error JA001"));
        assert!(out.contains("[1] status 409, XX999: not in catalog"));
    }
}
