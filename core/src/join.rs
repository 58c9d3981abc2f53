//! Join types and JOIN clauses.

use crate::expr::Condition;
use crate::schema::Table;
use crate::sql::{SQL, Token};
use crate::traits::ToSQL;

/// The type of JOIN operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum JoinType {
    Inner,
    /// Keeps rows of the left source that have no match.
    #[default]
    Left,
    /// Cartesian product; filtering happens in WHERE.
    Cross,
}

impl<'a> ToSQL<'a> for JoinType {
    fn to_sql(&self) -> SQL<'a> {
        SQL::raw(match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Cross => "CROSS JOIN",
        })
    }
}

/// A joined source with its ON condition.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause<'a> {
    join_type: JoinType,
    table: Table,
    on: Option<Condition<'a>>,
}

impl<'a> JoinClause<'a> {
    pub fn new(join_type: JoinType, table: Table, on: Condition<'a>) -> Self {
        Self {
            join_type,
            table,
            on: Some(on),
        }
    }

    /// `CROSS JOIN table`, used for theta joins.
    pub fn cross(table: Table) -> Self {
        Self {
            join_type: JoinType::Cross,
            table,
            on: None,
        }
    }

    /// Narrows the ON condition with an extra conjunct.
    ///
    /// For a LEFT join this filters the joined side only; unmatched rows of
    /// the left source are still returned.
    pub fn and_on(mut self, condition: Condition<'a>) -> Self {
        self.on = Some(match self.on.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    pub const fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub const fn table(&self) -> Table {
        self.table
    }
}

impl<'a> ToSQL<'a> for JoinClause<'a> {
    fn to_sql(&self) -> SQL<'a> {
        self.clone().into_sql()
    }

    fn into_sql(self) -> SQL<'a> {
        let sql = self.join_type.to_sql().push(self.table);
        match self.on {
            Some(on) => sql.push(Token::ON).append(on.into_sql()),
            None => sql,
        }
    }
}
