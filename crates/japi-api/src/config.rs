//! # Gateway Configuration
//!
//! Configuration is read from an optional YAML file named by `JAPI_CONFIG`,
//! then overridden by environment variables:
//!
//! | Variable | Overrides |
//! |---|---|
//! | `PORT` | `server.port` (default 8080) |
//! | `JAPI_REQUEST_TIMEOUT_SECS` | `server.request_timeout_secs` (default 30) |
//! | `JAPI_METRICS_ENABLED` | `server.metrics_enabled` (default true) |
//! | `DATABASE_URL` | the whole `pg` section |
//! | `JAPI_FIXTURES_DIR` | `engine.fixtures_dir` |
//! | `JAPI_ENGINE_USER_ID` | `engine.user_id` |
//! | `JAPI_ENGINE_COMPANY_ID` | `engine.company_id` |
//!
//! ```yaml
//! server:
//!   port: 8080
//!   request_timeout_secs: 30
//! pg:
//!   host: localhost
//!   dbname: jsonapi
//!   user: jsonapi
//!   password: secret
//! engine:
//!   user_id: "1"
//!   company_id: "1"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Default request body limit.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

/// Connection settings for the Postgres document engine.
///
/// Either a full `url` or the individual connection parameters. Custom
/// `Debug` redacts the password and the URL.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            dbname: "jsonapi".to_string(),
            user: "postgres".to_string(),
            password: None,
            max_connections: 20,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
    port: u16,
    request_timeout_secs: u64,
    max_body_bytes: usize,
    metrics_enabled: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: 8080,
            request_timeout_secs: 30,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            metrics_enabled: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EngineSection {
    user_id: String,
    company_id: String,
    fixtures_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    server: ServerSection,
    pg: Option<DatabaseConfig>,
    engine: EngineSection,
}

/// Runtime configuration of the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Upper bound on one engine call.
    pub request_timeout: Duration,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    /// Postgres engine settings; `None` when no database is configured.
    pub database: Option<DatabaseConfig>,
    /// Directory of fixture documents, used when no database is configured.
    pub fixtures_dir: Option<PathBuf>,
    /// Fourth `jsonapi()` argument.
    pub engine_user_id: String,
    /// Fifth `jsonapi()` argument.
    pub engine_company_id: String,
    /// Whether `/metrics` is served.
    pub metrics_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        FileConfig::default().into()
    }
}

impl From<FileConfig> for AppConfig {
    fn from(file: FileConfig) -> Self {
        Self {
            port: file.server.port,
            request_timeout: Duration::from_secs(file.server.request_timeout_secs),
            max_body_bytes: file.server.max_body_bytes,
            database: file.pg,
            fixtures_dir: file.engine.fixtures_dir,
            engine_user_id: file.engine.user_id,
            engine_company_id: file.engine.company_id,
            metrics_enabled: file.server.metrics_enabled,
        }
    }
}

impl AppConfig {
    /// Load configuration from `JAPI_CONFIG` (if set) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var_os("JAPI_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        base.apply_env(|var| std::env::var(var).ok())
    }

    /// Read a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse YAML configuration text. Empty text yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: FileConfig = serde_yaml::from_str(text)?;
        Ok(file.into())
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = parse_var("PORT", &port)?;
        }
        if let Some(secs) = lookup("JAPI_REQUEST_TIMEOUT_SECS") {
            self.request_timeout =
                Duration::from_secs(parse_var("JAPI_REQUEST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(enabled) = lookup("JAPI_METRICS_ENABLED") {
            self.metrics_enabled = parse_bool("JAPI_METRICS_ENABLED", &enabled)?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            let mut database = self.database.take().unwrap_or_default();
            database.url = Some(url);
            self.database = Some(database);
        }
        if let Some(dir) = lookup("JAPI_FIXTURES_DIR").filter(|d| !d.trim().is_empty()) {
            self.fixtures_dir = Some(PathBuf::from(dir));
        }
        if let Some(user_id) = lookup("JAPI_ENGINE_USER_ID") {
            self.engine_user_id = user_id;
        }
        if let Some(company_id) = lookup("JAPI_ENGINE_COMPANY_ID") {
            self.engine_company_id = company_id;
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
