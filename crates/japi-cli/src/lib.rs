//! # japi-cli: Document Verification Tool
//!
//! Provides the `japi` command-line interface for checking JSON:API
//! documents offline, for example recorded engine output or fixture files.
//!
//! ## Subcommands
//!
//! - `japi validate`: classify documents and list structural violations.
//! - `japi status`: derive the HTTP status the gateway would answer with
//!   and explain each error code against the engine catalog.
//!
//! ```bash
//! japi validate fixtures/users.json fixtures/users/1.json --expect data
//! japi status recorded/conflict.json
//! ```

pub mod status;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a file's text.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read and parse a JSON document.
pub fn read_document(path: &Path) -> Result<serde_json::Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}
