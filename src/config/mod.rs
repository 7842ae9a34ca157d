//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file + process environment
//!     → loader.rs (case-insensitive lookup, lenient parsing)
//!     → Settings (immutable, every field defaulted)
//!     → cache.rs (compute once, shared as Arc<Settings>)
//!     → derived_database_config() for the storage layer
//! ```
//!
//! # Design Decisions
//! - Loading never fails: absent, empty or malformed values keep the default
//! - Unknown variables are ignored
//! - Process variables win over `.env` entries
//! - Explicit construction bypasses the cache

pub mod cache;
pub mod loader;
pub mod schema;

pub use cache::{cached_load, SettingsCache};
pub use schema::{DatabaseConfig, LogLevel, Settings};
