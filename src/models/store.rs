//! Generic persistence for [`Record`] types.
//!
//! # Responsibilities
//! - Assign identity on first save
//! - Stamp `created_at`/`updated_at` on insert, refresh `updated_at` on update
//! - Skip writes for records with no pending changes
//!
//! # Design Decisions
//! - Timestamps are owned here, never by the entity
//! - A refreshed `updated_at` is strictly greater than the previous one even
//!   when the clock has not advanced
//! - Column values travel as JSON values and are bound by kind

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

use crate::db::Database;
use crate::models::base::Record;

/// Errors raised by [`RecordStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{table} row {id} no longer exists")]
    Missing { table: &'static str, id: i64 },
}

/// Saves, loads and deletes records through the shared database handle.
#[derive(Clone, Debug)]
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the backing table for `R` if it does not exist.
    pub async fn create_table<R: Record>(&self) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                id INTEGER PRIMARY KEY AUTOINCREMENT, \
                created_at TEXT NOT NULL, \
                updated_at TEXT NOT NULL, \
                {})",
            R::TABLE,
            R::COLUMN_DEFS
        );
        sqlx::query(&sql).execute(self.db.pool()).await?;
        Ok(())
    }

    /// Drop the backing table for `R`.
    pub async fn drop_table<R: Record>(&self) -> Result<(), StoreError> {
        let sql = format!("DROP TABLE IF EXISTS {}", R::TABLE);
        sqlx::query(&sql).execute(self.db.pool()).await?;
        Ok(())
    }

    /// Persist `record`.
    ///
    /// Returns `true` when a write happened. A persisted record without
    /// pending changes is left untouched.
    pub async fn save<R: Record>(&self, record: &mut R) -> Result<bool, StoreError> {
        match record.meta().id() {
            None => {
                self.insert(record).await?;
                Ok(true)
            }
            Some(id) if record.meta().is_dirty() => {
                self.update(record, id).await?;
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Load the record with `id`.
    pub async fn find<R: Record>(&self, id: i64) -> Result<Option<R>, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", R::TABLE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(row) => Ok(Some(R::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete `record` from the store. Returns `false` if it was never saved
    /// or is already gone.
    pub async fn delete<R: Record>(&self, record: &mut R) -> Result<bool, StoreError> {
        let Some(id) = record.meta().id() else {
            return Ok(false);
        };

        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(self.db.pool()).await?;

        record.meta_mut().mark_deleted();
        tracing::debug!(table = R::TABLE, id, "Record deleted");
        Ok(result.rows_affected() > 0)
    }

    async fn insert<R: Record>(&self, record: &mut R) -> Result<(), StoreError> {
        let columns = record.columns();
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let placeholders = vec!["?"; columns.len() + 2].join(", ");
        let sql = format!(
            "INSERT INTO {} (created_at, updated_at{}{}) VALUES ({})",
            R::TABLE,
            if names.is_empty() { "" } else { ", " },
            names.join(", "),
            placeholders
        );

        let now = Utc::now();
        let mut query = sqlx::query(&sql).bind(now).bind(now);
        for (_, value) in columns {
            query = bind_value(query, value);
        }

        let result = query.execute(self.db.pool()).await?;
        let id = result.last_insert_rowid();
        record.meta_mut().mark_inserted(id, now);

        tracing::debug!(table = R::TABLE, id, "Record inserted");
        Ok(())
    }

    async fn update<R: Record>(&self, record: &mut R, id: i64) -> Result<(), StoreError> {
        let columns = record.columns();
        let assignments: Vec<String> = columns
            .iter()
            .map(|(name, _)| format!("{} = ?", name))
            .chain(std::iter::once("updated_at = ?".to_string()))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            R::TABLE,
            assignments.join(", ")
        );

        let now = next_timestamp(record.meta().updated_at());
        let mut query = sqlx::query(&sql);
        for (_, value) in columns {
            query = bind_value(query, value);
        }
        let result = query.bind(now).bind(id).execute(self.db.pool()).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing { table: R::TABLE, id });
        }

        record.meta_mut().mark_updated(now);
        tracing::debug!(table = R::TABLE, id, "Record updated");
        Ok(())
    }
}

/// Current time, nudged past `previous` if the clock has not moved.
fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if now <= previous => previous + chrono::Duration::microseconds(1),
        _ => now,
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s),
        other => query.bind(other.to_string()),
    }
}
