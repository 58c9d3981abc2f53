//! Runs composed statements against a rusqlite connection.
//!
//! Each call prepares its statement, drains the rows into owned [`Row`]s,
//! and drops the statement before returning, on the error path as well.

use rosterdsl_core::row::statement_labels;
use rosterdsl_core::{FromRow, Result, RosterError, Row, SQL, ToSQL, roster_trace_query};
use rusqlite::{Connection, params_from_iter};

use crate::query::SelectQuery;

#[derive(Clone, Copy, Debug)]
pub struct Executor<'c> {
    conn: &'c Connection,
}

impl<'c> Executor<'c> {
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub const fn conn(&self) -> &'c Connection {
        self.conn
    }

    /// Runs the query and returns all rows in the order the store produced them.
    pub fn fetch<'a, T>(&self, query: T) -> Result<Vec<Row>>
    where
        T: ToSQL<'a>,
    {
        let sql = query.into_sql();
        let (sql_str, params) = sql.build();
        roster_trace_query!(&sql_str, params.len());

        let mut stmt = self.conn.prepare(&sql_str)?;
        let labels = statement_labels(&stmt);
        let rows = stmt.query_map(params_from_iter(params), |row| {
            Ok(Row::from_rusqlite(labels.clone(), row))
        })?;

        rows.collect::<std::result::Result<Result<Vec<_>>, _>>()?
    }

    /// Runs the query and decodes every row as `R`.
    pub fn fetch_as<'a, T, R>(&self, query: T) -> Result<Vec<R>>
    where
        T: ToSQL<'a>,
        R: FromRow,
    {
        self.fetch(query)?.iter().map(R::from_row).collect()
    }

    /// Exactly one row; zero is `NotFound`, more is `TooManyResults`.
    pub fn fetch_one<'a, T>(&self, query: T) -> Result<Row>
    where
        T: ToSQL<'a>,
    {
        self.fetch_optional(query)?.ok_or(RosterError::NotFound)
    }

    /// Zero or one row; more is `TooManyResults`.
    pub fn fetch_optional<'a, T>(&self, query: T) -> Result<Option<Row>>
    where
        T: ToSQL<'a>,
    {
        let mut rows = self.fetch(query)?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(RosterError::TooManyResults(n)),
        }
    }

    /// Single-column, single-row read such as `SELECT MAX(...)`.
    pub fn fetch_scalar<'a, T, R>(&self, query: T) -> Result<R>
    where
        T: ToSQL<'a>,
        R: FromRow,
    {
        R::from_row(&self.fetch_one(query)?)
    }

    /// Total number of rows `query` selects, ignoring its order and page window.
    pub fn count(&self, query: &SelectQuery<'_>) -> Result<u64> {
        self.fetch_scalar(query.count_query())
    }

    /// The page selected by `query` together with the unpaged total.
    pub fn fetch_page<'a>(&self, query: &SelectQuery<'a>) -> Result<(Vec<Row>, u64)> {
        let total = self.count(query)?;
        let rows = self.fetch(query)?;
        Ok((rows, total))
    }

    /// Runs a DML statement and returns the number of affected rows.
    pub fn execute_statement<'a, T>(&self, statement: T) -> Result<usize>
    where
        T: ToSQL<'a>,
    {
        let sql: SQL<'a> = statement.into_sql();
        let (sql_str, params) = sql.build();
        roster_trace_query!(&sql_str, params.len());

        Ok(self.conn.execute(&sql_str, params_from_iter(params))?)
    }
}
