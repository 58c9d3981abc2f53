//! Boolean conditions and the conjunction fold.
//!
//! ```ignore
//! // Function style
//! and([condition1, condition2])
//! or([condition1, condition2])
//! not(condition)
//!
//! // Operator style (via std::ops traits)
//! condition1 & condition2
//! condition1 | condition2
//! !condition
//! ```
//!
//! [`Predicate`] is the result of folding optional conditions. An absent
//! condition is the neutral element of AND, so folding nothing yields
//! [`Predicate::Always`] and the query renders without a `WHERE` clause.

use core::ops::{BitAnd, BitOr, Not};

use crate::sql::{SQL, SQLChunk, Token};
use crate::traits::ToSQL;

/// A boolean SQL expression usable in `WHERE`, `ON` and `HAVING`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition<'a>(SQL<'a>);

impl<'a> Condition<'a> {
    /// Wraps an already-boolean fragment.
    #[inline]
    pub fn new(sql: SQL<'a>) -> Self {
        Self(sql)
    }

    #[inline]
    pub fn sql(&self) -> &SQL<'a> {
        &self.0
    }

    pub fn and(self, other: Condition<'a>) -> Condition<'a> {
        and([self, other])
    }

    pub fn or(self, other: Condition<'a>) -> Condition<'a> {
        or([self, other])
    }

    pub fn not(self) -> Condition<'a> {
        not(self)
    }
}

impl<'a> ToSQL<'a> for Condition<'a> {
    fn to_sql(&self) -> SQL<'a> {
        self.0.clone()
    }

    fn into_sql(self) -> SQL<'a> {
        self.0
    }
}

impl<'a> BitAnd for Condition<'a> {
    type Output = Condition<'a>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<'a> BitOr for Condition<'a> {
    type Output = Condition<'a>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<'a> Not for Condition<'a> {
    type Output = Condition<'a>;

    fn not(self) -> Self::Output {
        not(self)
    }
}

// =============================================================================
// NOT
// =============================================================================

/// Logical NOT.
pub fn not(condition: Condition<'_>) -> Condition<'_> {
    let sql = condition.into_sql();
    let needs_paren = sql.chunks.len() > 1
        && !matches!(sql.chunks.first(), Some(SQLChunk::Token(Token::LPAREN)));

    let sql = if needs_paren {
        SQL::token(Token::NOT).append(sql.parens())
    } else {
        SQL::token(Token::NOT).append(sql)
    };
    Condition(sql)
}

// =============================================================================
// AND / OR
// =============================================================================

fn combine<'a, I>(conditions: I, separator: Token) -> Condition<'a>
where
    I: IntoIterator<Item = Condition<'a>>,
{
    let mut iter = conditions.into_iter();

    let Some(first) = iter.next() else {
        return Condition(SQL::empty());
    };
    let Some(second) = iter.next() else {
        return first;
    };

    let all = core::iter::once(first)
        .chain(core::iter::once(second))
        .chain(iter);
    Condition(SQL::join(all, separator).parens())
}

/// Logical AND of multiple conditions.
///
/// A single condition is returned unchanged; two or more are parenthesized.
pub fn and<'a, I>(conditions: I) -> Condition<'a>
where
    I: IntoIterator<Item = Condition<'a>>,
{
    combine(conditions, Token::AND)
}

/// Logical OR of multiple conditions.
pub fn or<'a, I>(conditions: I) -> Condition<'a>
where
    I: IntoIterator<Item = Condition<'a>>,
{
    combine(conditions, Token::OR)
}

// =============================================================================
// Predicate
// =============================================================================

/// The folded filter of a query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate<'a> {
    /// No constraint at all.
    #[default]
    Always,
    Where(Condition<'a>),
}

impl<'a> Predicate<'a> {
    /// Folds optional conditions with AND, skipping absent ones.
    ///
    /// ```ignore
    /// let predicate = Predicate::all([username_eq(None), age_goe(Some(30))]);
    /// // WHERE "member"."age" >= ?
    /// ```
    pub fn all<I>(conditions: I) -> Self
    where
        I: IntoIterator<Item = Option<Condition<'a>>>,
    {
        conditions
            .into_iter()
            .fold(Predicate::Always, |acc, next| acc.and(next))
    }

    /// Adds one more optional conjunct.
    pub fn and(self, condition: Option<Condition<'a>>) -> Self {
        match (self, condition) {
            (predicate, None) => predicate,
            (Predicate::Always, Some(c)) => Predicate::Where(c),
            (Predicate::Where(existing), Some(c)) => {
                Predicate::Where(Condition(join_flat(existing, c)))
            }
        }
    }

    #[inline]
    pub const fn is_always(&self) -> bool {
        matches!(self, Predicate::Always)
    }

    pub fn condition(&self) -> Option<&Condition<'a>> {
        match self {
            Predicate::Always => None,
            Predicate::Where(c) => Some(c),
        }
    }

    pub fn into_condition(self) -> Option<Condition<'a>> {
        match self {
            Predicate::Always => None,
            Predicate::Where(c) => Some(c),
        }
    }

    /// Renders `WHERE <condition>`, or nothing for [`Predicate::Always`].
    pub fn where_clause(&self) -> SQL<'a> {
        self.clause(Token::WHERE)
    }

    /// Renders `<keyword> <condition>`, or nothing for [`Predicate::Always`].
    pub fn clause(&self, keyword: Token) -> SQL<'a> {
        match self {
            Predicate::Always => SQL::empty(),
            Predicate::Where(c) => SQL::token(keyword).append(c.to_sql()),
        }
    }
}

impl<'a> From<Condition<'a>> for Predicate<'a> {
    fn from(value: Condition<'a>) -> Self {
        Predicate::Where(value)
    }
}

impl<'a> From<Option<Condition<'a>>> for Predicate<'a> {
    fn from(value: Option<Condition<'a>>) -> Self {
        Predicate::Always.and(value)
    }
}

impl<'a> FromIterator<Option<Condition<'a>>> for Predicate<'a> {
    fn from_iter<T: IntoIterator<Item = Option<Condition<'a>>>>(iter: T) -> Self {
        Predicate::all(iter)
    }
}

impl<'a> FromIterator<Condition<'a>> for Predicate<'a> {
    fn from_iter<T: IntoIterator<Item = Condition<'a>>>(iter: T) -> Self {
        Predicate::all(iter.into_iter().map(Some))
    }
}

/// `a AND b` without nesting parentheses for every fold step.
fn join_flat<'a>(existing: Condition<'a>, next: Condition<'a>) -> SQL<'a> {
    let sql = existing.into_sql();
    let open = matches!(sql.chunks.first(), Some(SQLChunk::Token(Token::LPAREN)))
        && is_flat_conjunction(&sql);

    let body = if open {
        let mut chunks = sql.chunks;
        chunks.remove(0);
        chunks.pop();
        SQL { chunks }
    } else {
        sql
    };

    body.push(Token::AND).append(next.into_sql()).parens()
}

/// True when the fragment is a single parenthesized group of AND-ed terms.
fn is_flat_conjunction(sql: &SQL<'_>) -> bool {
    let mut depth = 0usize;
    let mut saw_and = false;
    let last = sql.chunks.len().saturating_sub(1);
    for (i, chunk) in sql.chunks.iter().enumerate() {
        match chunk {
            SQLChunk::Token(Token::LPAREN) => depth += 1,
            SQLChunk::Token(Token::RPAREN) => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != last {
                    return false;
                }
            }
            SQLChunk::Token(Token::AND) if depth == 1 => saw_and = true,
            SQLChunk::Token(Token::OR) if depth == 1 => return false,
            _ => {}
        }
    }
    saw_and
}
