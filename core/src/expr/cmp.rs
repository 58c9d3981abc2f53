//! Comparison conditions.
//!
//! Either side may be a column, a bound value, any expression, or a
//! subquery. Subqueries are parenthesized automatically:
//!
//! ```ignore
//! eq(member.age, 10)                  // "member"."age" = ?
//! eq(member.team_id, team.id)         // "member"."team_id" = "team"."id"
//! eq(member.age, &max_age_subquery)   // "member"."age" = (SELECT ...)
//! ```

use crate::sql::{SQL, Token};
use crate::traits::ToSQL;

use super::Condition;

fn binary<'a, L, R>(left: L, op: Token, right: R) -> Condition<'a>
where
    L: ToSQL<'a>,
    R: ToSQL<'a>,
{
    Condition::new(
        left.into_sql()
            .parens_if_subquery()
            .push(op)
            .append(right.into_sql().parens_if_subquery()),
    )
}

/// `left = right`
pub fn eq<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> Condition<'a> {
    binary(left, Token::EQ, right)
}

/// `left <> right`
pub fn ne<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> Condition<'a> {
    binary(left, Token::NE, right)
}

/// `left > right`
pub fn gt<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> Condition<'a> {
    binary(left, Token::GT, right)
}

/// `left >= right`
pub fn gte<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> Condition<'a> {
    binary(left, Token::GE, right)
}

/// `left < right`
pub fn lt<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> Condition<'a> {
    binary(left, Token::LT, right)
}

/// `left <= right`
pub fn lte<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> Condition<'a> {
    binary(left, Token::LE, right)
}

/// `expr LIKE pattern`
pub fn like<'a, L: ToSQL<'a>, R: ToSQL<'a>>(expr: L, pattern: R) -> Condition<'a> {
    Condition::new(
        expr.into_sql()
            .push(Token::LIKE)
            .append(pattern.into_sql()),
    )
}

/// `expr BETWEEN low AND high`, inclusive on both ends.
pub fn between<'a, E, L, H>(expr: E, low: L, high: H) -> Condition<'a>
where
    E: ToSQL<'a>,
    L: ToSQL<'a>,
    H: ToSQL<'a>,
{
    Condition::new(
        expr.into_sql()
            .parens_if_subquery()
            .push(Token::BETWEEN)
            .append(low.into_sql())
            .push(Token::AND)
            .append(high.into_sql()),
    )
}

/// `expr IS NULL`
pub fn is_null<'a, E: ToSQL<'a>>(expr: E) -> Condition<'a> {
    Condition::new(expr.into_sql().push(Token::IS).push(Token::NULL))
}

/// `expr IS NOT NULL`
pub fn is_not_null<'a, E: ToSQL<'a>>(expr: E) -> Condition<'a> {
    Condition::new(
        expr.into_sql()
            .push(Token::IS)
            .push(Token::NOT)
            .push(Token::NULL),
    )
}

/// `expr IN (v1, v2, ...)`
///
/// An empty list matches nothing and renders as the constant `0`.
pub fn in_list<'a, E, I>(expr: E, values: I) -> Condition<'a>
where
    E: ToSQL<'a>,
    I: IntoIterator,
    I::Item: ToSQL<'a>,
{
    let list = SQL::join(values, Token::COMMA);
    if list.is_empty() {
        return Condition::new(SQL::raw("0"));
    }
    Condition::new(expr.into_sql().push(Token::IN).append(list.parens()))
}

/// `expr IN (SELECT ...)`
pub fn in_subquery<'a, E, S>(expr: E, subquery: S) -> Condition<'a>
where
    E: ToSQL<'a>,
    S: ToSQL<'a>,
{
    Condition::new(
        expr.into_sql()
            .push(Token::IN)
            .append(subquery.into_sql().parens()),
    )
}

/// `EXISTS (SELECT ...)`
pub fn exists<'a, S: ToSQL<'a>>(subquery: S) -> Condition<'a> {
    Condition::new(SQL::raw("EXISTS").append(subquery.into_sql().parens()))
}
