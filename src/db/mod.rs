//! Database connection handle.
//!
//! # Data Flow
//! ```text
//! Settings::derived_database_config()
//!     → Database::bind (parse URL, configure pool; no connection yet)
//!     → shared via AppState to handlers
//!     → first query opens a connection
//! ```
//!
//! # Design Decisions
//! - Binding is lazy: a bad URL fails at startup, an unreachable store only
//!   shows up on first use (readiness probe)
//! - In-memory SQLite is pinned to one long-lived connection so every query
//!   sees the same database
//! - Acquiring a connection is bounded so a stuck store cannot hang a probe

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;

use crate::config::DatabaseConfig;

/// Upper bound on waiting for a pooled connection.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_CONNECTIONS: u32 = 5;

/// Cloneable handle to the relational store.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    in_memory: bool,
}

impl Database {
    /// Configure how and where the storage layer connects.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let in_memory = is_in_memory(&config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)?;
        options = if config.echo {
            options.log_statements(log::LevelFilter::Info)
        } else {
            options.disable_statement_logging()
        };

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options.connect_lazy_with(options);

        tracing::debug!(url = %redact_url(&config.url), echo = config.echo, "Database bound");

        Ok(Self { pool, in_memory })
    }

    /// One trivial round-trip to the store.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// Close every connection; later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Drop any query string before logging a URL.
fn redact_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
