//! The aggregate query shape: one row per group, or one row overall.

use rosterdsl_core::expr::{avg, avg_truncated, count, eq, max, min, sum};
use rosterdsl_core::{
    Column, FromNamedRow, JoinClause, JoinType, Result, Row, SQL, ToSQL, Value, asc,
};

use super::select::{SelectQuery, select};
use crate::config::AverageMode;
use crate::criteria::MemberSearchCondition;
use crate::predicate::search_predicate;
use crate::schema::{MEMBER, TEAM};

const GROUP_KEY: &str = "group_key";

/// Count, sum, average, minimum and maximum of member ages.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// Value of the grouping column; `None` for an ungrouped aggregate.
    pub key: Option<Value<'static>>,
    pub count: i64,
    /// NULL aggregates (empty group) decode as `None`.
    pub sum: Option<i64>,
    pub avg: Option<f64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl FromNamedRow for AggregateRow {
    fn from_named_row(row: &Row) -> Result<Self> {
        let key = match row.index_of(GROUP_KEY) {
            Some(index) => Some(row.get::<Value<'static>>(index)?),
            None => None,
        };
        Ok(Self {
            key,
            count: row.get_named("count")?,
            sum: row.get_named("sum")?,
            avg: row.get_named("avg")?,
            min: row.get_named("min")?,
            max: row.get_named("max")?,
        })
    }
}

/// Renders the average according to `mode`.
pub fn average<'a, E: ToSQL<'a>>(expr: E, mode: AverageMode) -> SQL<'a> {
    match mode {
        AverageMode::Native => avg(expr),
        AverageMode::Truncate => avg_truncated(expr),
    }
}

/// Aggregates member ages over the members matching `condition`.
///
/// With `group_by` set, produces one row per distinct value of that column,
/// ordered by it. Team columns are available through a LEFT join, so members
/// without a team form their own NULL group.
pub fn compose_aggregate<'a>(
    condition: &'a MemberSearchCondition,
    group_by: Option<Column>,
    average_mode: AverageMode,
) -> SelectQuery<'a> {
    let stats = [
        count(MEMBER.id).alias("count"),
        sum(MEMBER.age).alias("sum"),
        average(MEMBER.age, average_mode).alias("avg"),
        min(MEMBER.age).alias("min"),
        max(MEMBER.age).alias("max"),
    ];

    let query = match group_by {
        Some(key) => select([key.alias(GROUP_KEY)]).columns(stats),
        None => select(stats),
    }
    .from(MEMBER.table)
    .join(JoinClause::new(
        JoinType::Left,
        TEAM.table,
        eq(MEMBER.team_id, TEAM.id),
    ))
    .filter(search_predicate(condition));

    match group_by {
        Some(key) => query.group_by([key]).order_by([asc(key)]),
        None => query,
    }
}
