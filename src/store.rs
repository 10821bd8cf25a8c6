//! Record store collaborator backing the `unique` and `exists` rules.
//!
//! The application's data store is modeled as a single read primitive:
//! fetch the first record in a table matching a set of column conditions.
//! The hosting framework supplies a real backend; [`MemoryStore`] covers
//! development and tests.

use crate::value::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read from a table.
    #[error("failed to read from `{table}`: {reason}")]
    ReadError {
        /// The table being queried
        table: String,
        /// Backend-specific cause
        reason: String,
    },

    /// Failed to write to a table.
    #[error("failed to write to `{table}`: {reason}")]
    WriteError {
        /// The table being written
        table: String,
        /// Backend-specific cause
        reason: String,
    },
}

/// Comparison operator for a read condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Column equals the value
    Eq,
    /// Column differs from the value
    Ne,
}

/// One column condition for a record lookup.
#[derive(Debug, Clone)]
pub struct Condition {
    /// Column name
    pub column: String,
    /// Comparison operator
    pub op: Op,
    /// Value to compare against
    pub value: Value,
}

impl Condition {
    /// Create a condition.
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Equality condition, the common case.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Eq, value)
    }

    fn matches(&self, record: &Record) -> bool {
        match (record.get(&self.column), self.op) {
            (Some(v), Op::Eq) => *v == self.value,
            (Some(v), Op::Ne) => *v != self.value,
            (None, _) => false,
        }
    }
}

/// A stored row, column name to value.
pub type Record = HashMap<String, Value>;

/// Read primitive over the application's data store.
pub trait RecordStore: Send + Sync {
    /// Return the first record in `table` matching every condition, or
    /// `None` when nothing matches. A missing table reads as no match.
    fn read(&self, table: &str, conditions: &[Condition]) -> StoreResult<Option<Record>>;
}

/// In-memory record store (for development/testing).
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row into a table, creating the table on first use.
    pub fn insert<K, V, I>(&self, table: impl Into<String>, row: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let table = table.into();
        let record: Record = row.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

        let mut tables = self.tables.write().map_err(|e| StoreError::WriteError {
            table: table.clone(),
            reason: format!("failed to acquire lock: {e}"),
        })?;

        tables.entry(table).or_default().push(record);
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, table: &str, conditions: &[Condition]) -> StoreResult<Option<Record>> {
        let tables = self.tables.read().map_err(|e| StoreError::ReadError {
            table: table.to_string(),
            reason: format!("failed to acquire lock: {e}"),
        })?;

        let Some(rows) = tables.get(table) else {
            return Ok(None);
        };

        Ok(rows
            .iter()
            .find(|row| conditions.iter().all(|c| c.matches(row)))
            .cloned())
    }
}
