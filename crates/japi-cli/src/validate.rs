//! # Validate Subcommand
//!
//! Classifies each document file and prints its violations. With
//! `--expect`, each document must also satisfy the named kind's predicate.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use japi_schema::{classify, violations, Classification, DocumentKind, ValidationViolations};

/// Arguments for the `japi validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document files to check.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Require every document to be of this kind
    /// (envelope, data, collection, resource, error, meta).
    #[arg(long, value_name = "KIND")]
    pub expect: Option<DocumentKind>,
}

/// Outcome of checking one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub classification: Classification,
    pub violations: ValidationViolations,
    /// The expected kind and whether the document satisfies it.
    pub expectation: Option<(DocumentKind, bool)>,
}

impl DocumentReport {
    pub fn passed(&self) -> bool {
        self.classification.is_valid() && self.expectation.map_or(true, |(_, ok)| ok)
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classification)?;
        if let Some((kind, ok)) = self.expectation {
            let verdict = if ok { "is" } else { "is NOT" };
            write!(f, " ({verdict} {kind})")?;
        }
        if !self.violations.is_empty() {
            write!(f, "\n{}", self.violations)?;
        }
        Ok(())
    }
}

/// Check one parsed document.
pub fn check_document(doc: &Value, expect: Option<DocumentKind>) -> DocumentReport {
    DocumentReport {
        classification: classify(doc),
        violations: violations(doc),
        expectation: expect.map(|kind| (kind, kind.matches(doc))),
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every document passes, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mut failed = 0usize;

    for path in &args.files {
        let doc = match crate::read_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                println!("FAIL: {}: {e:#}", path.display());
                failed += 1;
                continue;
            }
        };
        let report = check_document(&doc, args.expect);
        tracing::debug!(file = %path.display(), classification = %report.classification, "checked");
        let label = if report.passed() { "OK" } else { "FAIL" };
        println!("{label}: {}: {report}", path.display());
        if !report.passed() {
            failed += 1;
        }
    }

    println!(
        "\n{}/{} document(s) passed",
        args.files.len() - failed,
        args.files.len()
    );

    Ok(u8::from(failed > 0))
}
