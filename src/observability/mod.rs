//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → logging.rs (level filter + JSON or human-readable renderer)
//!     → stdout
//!
//! sqlx statement logs (log crate)
//!     → tracing-log bridge → same pipeline
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every request span
//! - Logging configuration is the only global mutable state

pub mod logging;

pub use logging::{configure, LogFormat, LogProfile};
