//! ORDER BY terms.

use crate::schema::OrderBy;
use crate::sql::{SQL, Token};
use crate::traits::ToSQL;

/// Where NULLs sort relative to every other value of a term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Nulls {
    First,
    Last,
}

/// One `expr ASC|DESC [NULLS FIRST|LAST]` term.
///
/// Without an explicit placement the store's native ordering applies:
/// NULL compares smaller than any value, so it comes first ascending and
/// last descending.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm<'a> {
    expr: SQL<'a>,
    direction: OrderBy,
    nulls: Option<Nulls>,
}

/// Ascending term.
pub fn asc<'a, E: ToSQL<'a>>(expr: E) -> OrderTerm<'a> {
    OrderTerm::new(expr, OrderBy::Asc)
}

/// Descending term.
pub fn desc<'a, E: ToSQL<'a>>(expr: E) -> OrderTerm<'a> {
    OrderTerm::new(expr, OrderBy::Desc)
}

impl<'a> OrderTerm<'a> {
    pub fn new<E: ToSQL<'a>>(expr: E, direction: OrderBy) -> Self {
        Self {
            expr: expr.into_sql(),
            direction,
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(Nulls::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(Nulls::Last);
        self
    }

    /// Applies `nulls` only when the term has no placement of its own.
    pub fn or_nulls(mut self, nulls: Option<Nulls>) -> Self {
        if self.nulls.is_none() {
            self.nulls = nulls;
        }
        self
    }

    pub const fn expr(&self) -> &SQL<'a> {
        &self.expr
    }

    pub const fn direction(&self) -> OrderBy {
        self.direction
    }

    pub const fn nulls(&self) -> Option<Nulls> {
        self.nulls
    }
}

impl<'a> ToSQL<'a> for OrderTerm<'a> {
    fn to_sql(&self) -> SQL<'a> {
        self.clone().into_sql()
    }

    fn into_sql(self) -> SQL<'a> {
        let sql = self.expr.parens_if_subquery().push(match self.direction {
            OrderBy::Asc => Token::ASC,
            OrderBy::Desc => Token::DESC,
        });
        match self.nulls {
            None => sql,
            Some(Nulls::First) => sql.push(Token::NULLS_FIRST),
            Some(Nulls::Last) => sql.push(Token::NULLS_LAST),
        }
    }
}
