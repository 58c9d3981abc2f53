//! Arithmetic, string, and general scalar expressions.

use crate::sql::{SQL, SQLChunk, Token};
use crate::traits::ToSQL;
use crate::value::Value;

/// `left + right`
///
/// Also the right-hand side of an increment assignment:
/// `SET "age" = "member"."age" + ?`.
pub fn add<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> SQL<'a> {
    binary(left, Token::PLUS, right, &[Token::PLUS, Token::MINUS], &[])
}

/// `left - right`
pub fn sub<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> SQL<'a> {
    binary(left, Token::MINUS, right, &[Token::PLUS, Token::MINUS], &[])
}

/// `left || right`
pub fn concat<'a, L: ToSQL<'a>, R: ToSQL<'a>>(left: L, right: R) -> SQL<'a> {
    binary(left, Token::CONCAT, right, &[Token::CONCAT], &[Token::CONCAT])
}

/// Joins two operands with `op`. An operand is parenthesized when it is a
/// subquery or has a top-level operator outside its `flat` list, so nesting
/// never changes evaluation order.
fn binary<'a, L: ToSQL<'a>, R: ToSQL<'a>>(
    left: L,
    op: Token,
    right: R,
    left_flat: &[Token],
    right_flat: &[Token],
) -> SQL<'a> {
    operand(left.into_sql(), left_flat)
        .push(op)
        .append(operand(right.into_sql(), right_flat))
}

fn operand<'a>(sql: SQL<'a>, flat: &[Token]) -> SQL<'a> {
    if sql.is_subquery() || has_top_level_operator(&sql, flat) {
        sql.parens()
    } else {
        sql
    }
}

fn has_top_level_operator(sql: &SQL<'_>, flat: &[Token]) -> bool {
    let mut depth = 0usize;
    for chunk in &sql.chunks {
        let SQLChunk::Token(token) = chunk else {
            continue;
        };
        match token {
            Token::LPAREN => depth += 1,
            Token::RPAREN => depth = depth.saturating_sub(1),
            t if depth == 0 && is_binary(*t) && !flat.contains(t) => return true,
            _ => {}
        }
    }
    false
}

const fn is_binary(token: Token) -> bool {
    token.is_operator()
        || matches!(
            token,
            Token::AND | Token::OR | Token::NOT | Token::IS | Token::IN | Token::BETWEEN | Token::LIKE
        )
}

/// LOWER(expr)
pub fn lower<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("LOWER", expr.into_sql())
}

/// UPPER(expr)
pub fn upper<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("UPPER", expr.into_sql())
}

/// CAST(expr AS TEXT), the string value of a number.
pub fn cast_text<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func(
        "CAST",
        expr.into_sql().push(Token::AS).append(SQL::raw("TEXT")),
    )
}

/// A named SQL function over any number of arguments.
///
/// ```ignore
/// func("REPLACE", [member.username.to_sql(), "member".to_sql(), "M".to_sql()])
/// // REPLACE("member"."username", ?, ?)
/// ```
pub fn func<'a, I>(name: &'static str, args: I) -> SQL<'a>
where
    I: IntoIterator,
    I::Item: ToSQL<'a>,
{
    let args = args
        .into_iter()
        .map(|arg| arg.into_sql().parens_if_subquery());
    SQL::func(name, SQL::join(args, Token::COMMA))
}

/// A literal projected as a column, e.g. `SELECT "member"."username", ?`.
pub fn constant<'a>(value: impl Into<Value<'a>>) -> SQL<'a> {
    SQL::param(value)
}
