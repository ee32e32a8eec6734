//! # Fixture Document Engine
//!
//! Serves canned documents keyed by method and path. Used for local
//! development against recorded engine output and for tests.
//!
//! Lookups ignore the query string. A request with no fixture receives a
//! `JA001` not-found error document, rendered the way the database engine
//! renders it (status with reason phrase, `self` link, protocol version).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use japi_core::{ErrorCode, ErrorDocument};
use parking_lot::RwLock;
use thiserror::Error;

use super::{DocumentEngine, EngineError, EngineRequest};

/// Errors loading fixtures from disk.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixtures directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("fixture {path} is not valid JSON: {source}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory table of documents keyed by `(METHOD, path)`.
///
/// Cloning shares the table; documents added through one clone are visible
/// through every other.
#[derive(Debug, Clone, Default)]
pub struct FixtureEngine {
    documents: Arc<RwLock<HashMap<(String, String), String>>>,
}

impl FixtureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FixtureEngine::insert`].
    pub fn with_document(self, method: &str, path: &str, document: impl Into<String>) -> Self {
        self.insert(method, path, document);
        self
    }

    /// Register the document returned for `method` on `path`, replacing any
    /// previous one.
    pub fn insert(&self, method: &str, path: &str, document: impl Into<String>) {
        self.documents
            .write()
            .insert(key(method, path), document.into());
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load every `*.json` file below `dir` as a GET fixture.
    ///
    /// `users.json` serves `/users`, `users/1.json` serves `/users/1`, and an
    /// `index.json` serves its directory (the root `index.json` serves `/`).
    /// Every file must parse as JSON. Symlinked directories are skipped.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FixtureError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        let engine = Self::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            for entry in std::fs::read_dir(&current)? {
                let entry = entry?;
                let file_type = entry.file_type()?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                // Symlinked directories are not followed.
                if file_type.is_symlink() && path.is_dir() {
                    tracing::debug!(dir = %path.display(), "skipping symlinked directory");
                    continue;
                }
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let text = std::fs::read_to_string(&path)?;
                if let Err(source) = serde_json::from_str::<serde::de::IgnoredAny>(&text) {
                    return Err(FixtureError::InvalidDocument { path, source });
                }
                let route = route_for(dir, &path);
                tracing::debug!(route = %route, file = %path.display(), "loaded fixture");
                engine.insert("GET", &route, text);
            }
        }
        tracing::info!(count = engine.len(), dir = %dir.display(), "fixtures loaded");
        Ok(engine)
    }
}

fn key(method: &str, path: &str) -> (String, String) {
    (method.to_ascii_uppercase(), path.to_string())
}

/// URL path served by the fixture file at `file` below `root`.
fn route_for(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file).with_extension("");
    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.last().map(String::as_str) == Some("index") {
        segments.pop();
    }
    format!("/{}", segments.join("/"))
}

/// The engine's not-found document for `url`.
fn not_found_document(url: &str) -> Result<String, serde_json::Error> {
    let entry = ErrorCode::lookup(ErrorCode::NOT_FOUND);
    let mut error = entry.to_error_object();
    error.status = entry.status.to_string();
    ErrorDocument::new(vec![error], url).to_json()
}

#[async_trait]
impl DocumentEngine for FixtureEngine {
    async fn execute(&self, request: &EngineRequest) -> Result<String, EngineError> {
        let found = self
            .documents
            .read()
            .get(&key(&request.method, request.path()))
            .cloned();
        match found {
            Some(document) => Ok(document),
            None => Ok(not_found_document(&request.url)?),
        }
    }

    fn engine_name(&self) -> &str {
        "fixture"
    }
}
