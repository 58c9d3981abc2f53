//! Mapping result rows onto output shapes.
//!
//! Projection never goes back to the store. Three shapes are supported:
//!
//! - flat records, matched by position ([`FromRow`]) or by label
//!   ([`FromNamedRow`])
//! - a single scalar column
//! - [`Tuple`], read by the expression that produced each column

use std::sync::Arc;

use rosterdsl_core::{FromNamedRow, FromRow, Result, RosterError, Row, ToSQL};

use crate::query::SelectQuery;

// =============================================================================
// DTOs
// =============================================================================

/// The denormalized member/team search result.
///
/// Columns: `memberId, username, age, teamId, teamName`. Team fields are
/// `None` for members returned through a LEFT join without a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl FromRow for MemberTeamDto {
    const COLUMN_COUNT: usize = 5;

    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        Ok(Self {
            member_id: row.get(offset)?,
            username: row.get(offset + 1)?,
            age: row.get(offset + 2)?,
            team_id: row.get(offset + 3)?,
            team_name: row.get(offset + 4)?,
        })
    }
}

/// `username` and `age`, matched by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i64,
}

impl FromNamedRow for MemberDto {
    fn from_named_row(row: &Row) -> Result<Self> {
        Ok(Self {
            username: row.get_named("username")?,
            age: row.get_named("age")?,
        })
    }
}

/// `name` and `age` under different labels than the member columns.
///
/// `age` is commonly a scalar subquery aliased as `"age"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i64,
}

impl FromNamedRow for UserDto {
    fn from_named_row(row: &Row) -> Result<Self> {
        Ok(Self {
            name: row.get_named("name")?,
            age: row.get_named("age")?,
        })
    }
}

// =============================================================================
// Tuple
// =============================================================================

/// A row addressed by the expressions that were selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    identities: Arc<[String]>,
    row: Row,
}

impl Tuple {
    /// Decodes the column produced by `expr`.
    ///
    /// ```ignore
    /// let username: Option<String> = tuple.get(&MEMBER.username)?;
    /// let age: i64 = tuple.get(&MEMBER.age)?;
    /// ```
    pub fn get<'a, T: FromRow>(&self, expr: impl ToSQL<'a>) -> Result<T> {
        let identity = expr.into_sql().split_alias().0.parens_if_subquery().identity();
        let index = self
            .identities
            .iter()
            .position(|i| *i == identity)
            .ok_or_else(|| RosterError::Mapping(format!("`{identity}` was not selected")))?;
        self.row.get(index)
    }

    pub fn row(&self) -> &Row {
        &self.row
    }
}

// =============================================================================
// Projector
// =============================================================================

/// Positional projection. Every row must be exactly `T::COLUMN_COUNT` wide.
pub fn project<T: FromRow>(rows: &[Row]) -> Result<Vec<T>> {
    rows.iter()
        .map(|row| {
            if row.len() != T::COLUMN_COUNT {
                return Err(RosterError::Mapping(format!(
                    "expected {} columns, row has {}",
                    T::COLUMN_COUNT,
                    row.len()
                )));
            }
            T::from_row(row)
        })
        .collect()
}

/// Label-matched projection.
pub fn project_named<T: FromNamedRow>(rows: &[Row]) -> Result<Vec<T>> {
    rows.iter().map(T::from_named_row).collect()
}

/// Single-column projection.
pub fn project_scalar<T: FromRow>(rows: &[Row]) -> Result<Vec<T>> {
    rows.iter()
        .map(|row| {
            if row.len() != 1 {
                return Err(RosterError::Mapping(format!(
                    "scalar projection over a row of {} columns",
                    row.len()
                )));
            }
            row.get(0)
        })
        .collect()
}

/// Tuple projection; `query` must be the query that produced `rows`.
pub fn project_tuples(rows: Vec<Row>, query: &SelectQuery<'_>) -> Result<Vec<Tuple>> {
    let identities: Arc<[String]> = query.column_identities().into();
    rows.into_iter()
        .map(|row| {
            if row.len() != identities.len() {
                return Err(RosterError::Mapping(format!(
                    "query selects {} expressions, row has {}",
                    identities.len(),
                    row.len()
                )));
            }
            Ok(Tuple {
                identities: identities.clone(),
                row,
            })
        })
        .collect()
}
