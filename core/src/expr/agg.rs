//! Aggregate functions.
//!
//! Every aggregate renders as a plain function call and can be selected,
//! compared in `HAVING`, or aliased like any other expression.

use crate::sql::{SQL, Token};
use crate::traits::ToSQL;

/// COUNT(*) - counts all rows.
///
/// ```ignore
/// let total = count_all();
/// // Generates: COUNT(*)
/// ```
pub fn count_all<'a>() -> SQL<'a> {
    SQL::func("COUNT", SQL::token(Token::STAR))
}

/// COUNT(expr) - counts non-null values.
pub fn count<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("COUNT", expr.into_sql())
}

/// COUNT(DISTINCT expr) - counts distinct non-null values.
pub fn count_distinct<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func(
        "COUNT",
        SQL::token(Token::DISTINCT).append(expr.into_sql()),
    )
}

/// SUM(expr). NULL over an empty set.
pub fn sum<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("SUM", expr.into_sql())
}

/// AVG(expr) with the store's native fractional averaging.
pub fn avg<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("AVG", expr.into_sql())
}

/// CAST(AVG(expr) AS INTEGER), truncating toward zero.
///
/// ```ignore
/// avg_truncated(member.age)
/// // ages 10, 15 -> 12 rather than 12.5
/// ```
pub fn avg_truncated<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("CAST", avg(expr).push(Token::AS).append(SQL::raw("INTEGER")))
}

/// MIN(expr)
pub fn min<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("MIN", expr.into_sql())
}

/// MAX(expr)
pub fn max<'a, E: ToSQL<'a>>(expr: E) -> SQL<'a> {
    SQL::func("MAX", expr.into_sql())
}
