//! CASE/WHEN expressions.
//!
//! ```ignore
//! // Simple CASE, comparing one operand against each WHEN value
//! case_on(member.age)
//!     .when(10, "ten")
//!     .when(20, "twenty")
//!     .otherwise("other")
//!
//! // Searched CASE, one condition per branch
//! case()
//!     .when(between(member.age, 0, 20), "0~20")
//!     .when(between(member.age, 21, 30), "21~30")
//!     .otherwise("other")
//! ```

use crate::sql::{SQL, Token};
use crate::traits::ToSQL;

use super::Condition;

/// Start building a searched CASE expression.
pub fn case<'a>() -> CaseBuilder<'a> {
    CaseBuilder {
        sql: SQL::token(Token::CASE),
        branches: 0,
    }
}

/// Start building a simple CASE expression over `operand`.
pub fn case_on<'a, E: ToSQL<'a>>(operand: E) -> SimpleCaseBuilder<'a> {
    SimpleCaseBuilder {
        sql: SQL::token(Token::CASE).append(operand.into_sql().parens_if_subquery()),
        branches: 0,
    }
}

/// Searched CASE under construction.
#[derive(Debug, Clone)]
pub struct CaseBuilder<'a> {
    sql: SQL<'a>,
    branches: usize,
}

impl<'a> CaseBuilder<'a> {
    pub fn when<R: ToSQL<'a>>(mut self, condition: Condition<'a>, result: R) -> Self {
        self.sql = self
            .sql
            .push(Token::WHEN)
            .append(condition.into_sql())
            .push(Token::THEN)
            .append(result.into_sql());
        self.branches += 1;
        self
    }

    /// Finish with an ELSE branch.
    pub fn otherwise<D: ToSQL<'a>>(self, default: D) -> SQL<'a> {
        self.sql
            .push(Token::ELSE)
            .append(default.into_sql())
            .push(Token::END)
    }

    /// Finish without ELSE; unmatched rows produce NULL.
    pub fn end(self) -> SQL<'a> {
        self.sql.push(Token::END)
    }

    pub const fn branches(&self) -> usize {
        self.branches
    }
}

/// Simple CASE under construction.
#[derive(Debug, Clone)]
pub struct SimpleCaseBuilder<'a> {
    sql: SQL<'a>,
    branches: usize,
}

impl<'a> SimpleCaseBuilder<'a> {
    pub fn when<V: ToSQL<'a>, R: ToSQL<'a>>(mut self, value: V, result: R) -> Self {
        self.sql = self
            .sql
            .push(Token::WHEN)
            .append(value.into_sql())
            .push(Token::THEN)
            .append(result.into_sql());
        self.branches += 1;
        self
    }

    pub fn otherwise<D: ToSQL<'a>>(self, default: D) -> SQL<'a> {
        self.sql
            .push(Token::ELSE)
            .append(default.into_sql())
            .push(Token::END)
    }

    pub fn end(self) -> SQL<'a> {
        self.sql.push(Token::END)
    }

    pub const fn branches(&self) -> usize {
        self.branches
    }
}
