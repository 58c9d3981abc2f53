//! Detaching [`rusqlite::Row`]s into owned [`Row`]s.

use std::sync::Arc;

use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

impl Row {
    /// Copies every column of a rusqlite row.
    ///
    /// `labels` is computed once per statement and shared by all its rows.
    pub fn from_rusqlite(labels: Arc<[String]>, row: &::rusqlite::Row<'_>) -> Result<Self> {
        let mut values = Vec::with_capacity(labels.len());
        for index in 0..labels.len() {
            values.push(Value::from(row.get_ref(index)?));
        }
        Row::new(labels, values)
    }
}

/// Column labels of a prepared statement, in select-list order.
pub fn statement_labels(stmt: &::rusqlite::Statement<'_>) -> Arc<[String]> {
    stmt.column_names()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
