//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON. Every section
//! defaults sensibly so a completely empty `{}` file is valid, and the
//! database location can be overridden from the `DB_URI` environment
//! variable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Environment variable that overrides [`DatabaseConfig::url`].
pub const DB_URI_ENV: &str = "DB_URI";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| Error::Config(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_db_uri(std::env::var(DB_URI_ENV).ok());
    }

    /// Replace the database URL when an override is present and non-empty.
    pub fn apply_db_uri(&mut self, db_uri: Option<String>) {
        if let Some(uri) = db_uri.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Database URL overridden from {DB_URI_ENV}");
            self.database.url = uri;
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.database.pool_size == 0 {
            warnings.push("database.pool_size is 0; falling back to 1 connection".into());
        }

        if let Err(e) = DatabaseLocation::parse(&self.database.url) {
            warnings.push(format!("database.url is not usable: {e}"));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5555,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLAlchemy-style SQLite URL, e.g. `sqlite:///app.db`.
    pub url: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:///app.db".into(),
            pool_size: 4,
        }
    }
}

impl DatabaseConfig {
    /// Resolve the configured URL into a concrete location.
    pub fn location(&self) -> Result<DatabaseLocation> {
        DatabaseLocation::parse(&self.url)
    }
}

// ---------------------------------------------------------------------------
// DatabaseLocation
// ---------------------------------------------------------------------------

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database file on disk.
    File(PathBuf),
    /// A private in-memory database.
    Memory,
}

impl DatabaseLocation {
    /// Parse a database URL.
    ///
    /// Accepted forms:
    /// - `sqlite://` or `sqlite:///:memory:` -- in-memory
    /// - `sqlite:///relative/path.db` -- relative to the working directory
    /// - `sqlite:////absolute/path.db` -- absolute path
    /// - a bare filesystem path with no scheme
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::Config("database url is empty".into()));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Ok(Self::File(PathBuf::from(url)));
        };

        if scheme != "sqlite" {
            return Err(Error::Config(format!(
                "unsupported database scheme '{scheme}' (only sqlite is supported)"
            )));
        }

        if rest.is_empty() {
            return Ok(Self::Memory);
        }

        // After "sqlite://" comes an (always empty) host, then "/" and the path.
        let Some(path) = rest.strip_prefix('/') else {
            return Err(Error::Config(format!(
                "malformed sqlite url '{url}' (expected sqlite:///path)"
            )));
        };

        match path {
            "" | ":memory:" => Ok(Self::Memory),
            p => Ok(Self::File(PathBuf::from(p))),
        }
    }
}
