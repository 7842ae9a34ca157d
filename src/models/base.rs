//! Base shape shared by every persisted entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Identity and timestamp bookkeeping embedded in every entity.
///
/// Only the store writes these fields. `created_at <= updated_at` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMeta {
    id: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    dirty: bool,
}

impl RecordMeta {
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// True when fields changed since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag that an entity field changed in memory.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_inserted(&mut self, id: i64, now: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self.dirty = false;
    }

    pub(crate) fn mark_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
        self.dirty = false;
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.id = None;
        self.dirty = false;
    }

    /// Read `id`, `created_at` and `updated_at` columns from a row.
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: Some(row.try_get("id")?),
            created_at: Some(row.try_get("created_at")?),
            updated_at: Some(row.try_get("updated_at")?),
            dirty: false,
        })
    }
}

/// A persisted entity.
///
/// Implementors embed a [`RecordMeta`] and describe their own columns; the
/// store handles identity and timestamps.
pub trait Record: Sized + Send + Unpin {
    /// Backing table name.
    const TABLE: &'static str;

    /// SQL column definitions for the entity's own columns,
    /// e.g. `"name TEXT NOT NULL, value INTEGER NOT NULL DEFAULT 0"`.
    const COLUMN_DEFS: &'static str;

    /// Typed partial update: every field optional.
    type Patch;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Declared entity columns (excluding id and timestamps) with current values.
    fn columns(&self) -> Vec<(&'static str, Value)>;

    /// Rebuild the entity from a full row.
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    /// Overwrite the supplied fields in memory.
    ///
    /// Implementations call [`RecordMeta::mark_dirty`] when a value changes.
    /// Nothing is persisted and `updated_at` is left alone.
    fn apply_updates(&mut self, patch: Self::Patch);

    /// Flat key/value view of the current in-memory state.
    fn to_projection(&self) -> Map<String, Value> {
        let meta = self.meta();
        let mut projection = Map::new();
        projection.insert("id".into(), meta.id().map(Value::from).unwrap_or(Value::Null));
        projection.insert("created_at".into(), timestamp_value(meta.created_at()));
        projection.insert("updated_at".into(), timestamp_value(meta.updated_at()));
        for (name, value) in self.columns() {
            projection.insert(name.to_string(), value);
        }
        projection
    }

    /// Short diagnostic identifier, e.g. `<Widget(id=3)>`.
    fn describe(&self) -> Described<'_, Self> {
        Described(self)
    }
}

fn timestamp_value(ts: Option<DateTime<Utc>>) -> Value {
    ts.map(|ts| Value::String(ts.to_rfc3339()))
        .unwrap_or(Value::Null)
}

/// Display adapter returned by [`Record::describe`].
pub struct Described<'a, R>(&'a R);

impl<R: Record> fmt::Display for Described<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<R>().rsplit("::").next().unwrap_or("Record");
        match self.0.meta().id() {
            Some(id) => write!(f, "<{}(id={})>", name, id),
            None => write!(f, "<{}(id=None)>", name),
        }
    }
}
