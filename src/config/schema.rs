//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the service.
//! Every field has a default, so a `Settings` value can always be built.

use std::fmt;
use std::str::FromStr;

/// Root settings for the API service.
#[derive(Clone, PartialEq)]
pub struct Settings {
    /// Deployment environment name ("development", "testing", "production", ...).
    pub flask_env: String,

    /// Enable debug mode.
    pub flask_debug: bool,

    /// Secret key for signing sessions.
    // WARNING: the default is a placeholder. Override it in production.
    pub secret_key: String,

    /// Database connection URL.
    pub database_url: String,

    /// Echo SQL statements to the log.
    pub database_echo: bool,

    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Minimum log severity.
    pub log_level: LogLevel,

    /// API title (documentation metadata).
    pub api_title: String,

    /// API version (documentation metadata).
    pub api_version: String,

    /// Comma-separated CORS allowed origins.
    pub cors_origins: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flask_env: "development".to_string(),
            flask_debug: false,
            secret_key: "dev-secret-key-change-in-production".to_string(),
            database_url: "sqlite://app.db?mode=rwc".to_string(),
            database_echo: false,
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: LogLevel::Info,
            api_title: "Flask RESTful API".to_string(),
            api_version: "1.0.0".to_string(),
            cors_origins: None,
        }
    }
}

impl Settings {
    /// Project the database settings into the shape the storage layer expects.
    pub fn derived_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            echo: self.database_echo,
            track_modifications: false,
        }
    }

    /// True when running under the "testing" environment.
    pub fn is_testing(&self) -> bool {
        self.flask_env == "testing"
    }

    /// `host:port` pair for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured CORS origins, trimmed, empty entries dropped.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("flask_env", &self.flask_env)
            .field("flask_debug", &self.flask_debug)
            .field("secret_key", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("database_echo", &self.database_echo)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("api_title", &self.api_title)
            .field("api_version", &self.api_version)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

/// Database configuration consumed by [`crate::db::Database::bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,

    /// Log every executed statement.
    pub echo: bool,

    /// Change tracking on the session. Always disabled.
    pub track_modifications: bool,
}

/// Log severity accepted in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Parse a level name case-insensitively, falling back to `Info`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct UnknownLogLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}
