//! Persisted records.
//!
//! # Data Flow
//! ```text
//! Entity (embeds RecordMeta, implements Record)
//!     → apply_updates(Patch) marks it dirty in memory
//!     → RecordStore::save (insert or update, stamps timestamps)
//!     → to_projection() for JSON output
//! ```
//!
//! # Design Decisions
//! - Composition over inheritance: entities embed a RecordMeta value
//! - Partial updates are typed patches; an unknown field does not compile
//! - No concrete entity lives here yet

pub mod base;
pub mod store;

pub use base::{Described, Record, RecordMeta};
pub use store::{RecordStore, StoreError};
