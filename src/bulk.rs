//! Bulk UPDATE and DELETE.
//!
//! These statements go straight to the store. Entities already loaded into a
//! [`Session`](crate::session::Session) are not touched and keep their old
//! values until the session is cleared.

use rosterdsl_core::expr::add;
use rosterdsl_core::{
    Column, Predicate, Result, RosterError, SQL, Table, ToSQL, Token, Value,
    roster_trace_mutation,
};

use crate::executor::Executor;

/// Right-hand side of one `SET` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment<'a> {
    /// `column = ?`
    Literal(Value<'a>),
    /// `column = column + ?`
    Increment(i64),
    /// `column = <expr>`
    Expr(SQL<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdate<'a> {
    table: Table,
    assignments: Vec<(Column, Assignment<'a>)>,
    predicate: Predicate<'a>,
}

impl<'a> BulkUpdate<'a> {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            predicate: Predicate::Always,
        }
    }

    pub fn assign(mut self, column: Column, assignment: Assignment<'a>) -> Self {
        self.assignments.push((column, assignment));
        self
    }

    /// Replaces the column with a literal.
    pub fn set(mut self, column: Column, value: impl Into<Value<'a>>) -> Self {
        self.assignments
            .push((column, Assignment::Literal(value.into())));
        self
    }

    /// Adds `delta` to the column's current value.
    pub fn increment(mut self, column: Column, delta: i64) -> Self {
        self.assignments.push((column, Assignment::Increment(delta)));
        self
    }

    pub fn set_expr(mut self, column: Column, expr: impl ToSQL<'a>) -> Self {
        self.assignments
            .push((column, Assignment::Expr(expr.into_sql())));
        self
    }

    /// ANDs a condition into the filter. Without one every row is updated.
    pub fn filter(mut self, predicate: impl Into<Predicate<'a>>) -> Self {
        self.predicate = self.predicate.and(predicate.into().into_condition());
        self
    }

    pub fn assignments(&self) -> &[(Column, Assignment<'a>)] {
        &self.assignments
    }

    /// `UPDATE "t" SET "c" = ... [WHERE ...]`
    pub fn statement(&self) -> Result<SQL<'a>> {
        if self.assignments.is_empty() {
            return Err(RosterError::Validation(
                "bulk update needs at least one assignment".into(),
            ));
        }
        if let Some((column, _)) = self
            .assignments
            .iter()
            .find(|(c, _)| c.table().name() != self.table.name())
        {
            return Err(RosterError::Validation(format!(
                "cannot assign `{}` of table `{}` in an update of `{}`",
                column.name(),
                column.table().name(),
                self.table.name()
            )));
        }

        let set = self.assignments.iter().map(|(column, assignment)| {
            let rhs = match assignment {
                Assignment::Literal(value) => SQL::param(value.clone()),
                Assignment::Increment(delta) => add(*column, *delta),
                Assignment::Expr(expr) => expr.clone().parens_if_subquery(),
            };
            SQL::ident(column.name()).push(Token::EQ).append(rhs)
        });

        Ok(SQL::token(Token::UPDATE)
            .push(self.table)
            .push(Token::SET)
            .append(SQL::join(set, Token::COMMA))
            .append(self.predicate.where_clause()))
    }

    /// Runs the update and returns the number of rows changed.
    pub fn execute(&self, executor: &Executor<'_>) -> Result<usize> {
        let affected = executor.execute_statement(self.statement()?)?;
        roster_trace_mutation!("update", self.table.name(), affected);
        Ok(affected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkDelete<'a> {
    table: Table,
    predicate: Predicate<'a>,
}

impl<'a> BulkDelete<'a> {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            predicate: Predicate::Always,
        }
    }

    /// ANDs a condition into the filter. Without one every row is deleted.
    pub fn filter(mut self, predicate: impl Into<Predicate<'a>>) -> Self {
        self.predicate = self.predicate.and(predicate.into().into_condition());
        self
    }

    /// `DELETE FROM "t" [WHERE ...]`
    pub fn statement(&self) -> SQL<'a> {
        SQL::token(Token::DELETE)
            .push(Token::FROM)
            .push(self.table)
            .append(self.predicate.where_clause())
    }

    /// Runs the delete and returns the number of rows removed.
    pub fn execute(&self, executor: &Executor<'_>) -> Result<usize> {
        let affected = executor.execute_statement(self.statement())?;
        roster_trace_mutation!("delete", self.table.name(), affected);
        Ok(affected)
    }
}
