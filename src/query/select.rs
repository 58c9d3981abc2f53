//! The immutable SELECT query.
//!
//! Every builder method consumes the query and returns the extended one, so
//! a partially built query can be cloned and branched without the branches
//! observing each other.
//!
//! ```ignore
//! let query = select([MEMBER.username.to_sql(), TEAM.name.to_sql()])
//!     .from(MEMBER.table)
//!     .left_join(TEAM.table, eq(MEMBER.team_id, TEAM.id))
//!     .filter(search_predicate(&condition))
//!     .order_by([asc(MEMBER.username).nulls_last()])
//!     .page(Page::new(0, 10)?);
//! ```

use rosterdsl_core::expr::Condition;
use rosterdsl_core::{JoinClause, JoinType, OrderTerm, Predicate, SQL, Table, ToSQL, Token};
use smallvec::SmallVec;

use super::page::Page;

/// Starts a query selecting `columns`.
///
/// Subquery columns are parenthesized; a trailing `AS "label"` is kept.
pub fn select<'a, I>(columns: I) -> SelectQuery<'a>
where
    I: IntoIterator,
    I::Item: ToSQL<'a>,
{
    SelectQuery::default().columns(columns)
}

/// Starts a `SELECT DISTINCT` query.
pub fn select_distinct<'a, I>(columns: I) -> SelectQuery<'a>
where
    I: IntoIterator,
    I::Item: ToSQL<'a>,
{
    SelectQuery {
        distinct: true,
        ..SelectQuery::default()
    }
    .columns(columns)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery<'a> {
    distinct: bool,
    columns: SmallVec<[SQL<'a>; 8]>,
    from: Option<Table>,
    joins: SmallVec<[JoinClause<'a>; 2]>,
    predicate: Predicate<'a>,
    group_by: SmallVec<[SQL<'a>; 2]>,
    having: Predicate<'a>,
    order_by: SmallVec<[OrderTerm<'a>; 4]>,
    page: Option<Page>,
}

impl<'a> SelectQuery<'a> {
    /// Appends more selected expressions.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSQL<'a>,
    {
        self.columns.extend(columns.into_iter().map(|c| {
            let (expr, alias) = c.into_sql().split_alias();
            let expr = expr.parens_if_subquery();
            match alias {
                Some(alias) => expr.alias(alias),
                None => expr,
            }
        }));
        self
    }

    pub fn from(mut self, table: Table) -> Self {
        self.from = Some(table);
        self
    }

    pub fn join(mut self, join: JoinClause<'a>) -> Self {
        self.joins.push(join);
        self
    }

    pub fn left_join(self, table: Table, on: Condition<'a>) -> Self {
        self.join(JoinClause::new(JoinType::Left, table, on))
    }

    pub fn inner_join(self, table: Table, on: Condition<'a>) -> Self {
        self.join(JoinClause::new(JoinType::Inner, table, on))
    }

    /// Unconstrained product with `table`; relate the sources in `filter`.
    pub fn cross_join(self, table: Table) -> Self {
        self.join(JoinClause::cross(table))
    }

    /// ANDs a predicate or condition into the WHERE clause.
    pub fn filter(mut self, predicate: impl Into<Predicate<'a>>) -> Self {
        self.predicate = self.predicate.and(predicate.into().into_condition());
        self
    }

    pub fn group_by<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSQL<'a>,
    {
        self.group_by
            .extend(keys.into_iter().map(|k| k.into_sql().parens_if_subquery()));
        self
    }

    /// ANDs a condition into the HAVING clause.
    pub fn having(mut self, predicate: impl Into<Predicate<'a>>) -> Self {
        self.having = self.having.and(predicate.into().into_condition());
        self
    }

    pub fn order_by<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = OrderTerm<'a>>,
    {
        self.order_by.extend(terms);
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Drops the page window, keeping everything else.
    pub fn unpaged(mut self) -> Self {
        self.page = None;
        self
    }

    pub fn predicate(&self) -> &Predicate<'a> {
        &self.predicate
    }

    pub fn page_window(&self) -> Option<Page> {
        self.page
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Identity of each selected expression, without its alias.
    pub fn column_identities(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.clone().split_alias().0.identity())
            .collect()
    }

    /// `SELECT COUNT(*) FROM (...)` over the filtered rows, ignoring order
    /// and the page window.
    ///
    /// Grouped queries count groups, and DISTINCT queries count distinct rows.
    pub fn count_query(&self) -> SQL<'a> {
        let inner = SelectQuery {
            distinct: self.distinct,
            columns: if self.distinct {
                self.columns.clone()
            } else {
                smallvec::smallvec![SQL::raw("1")]
            },
            from: self.from,
            joins: self.joins.clone(),
            predicate: self.predicate.clone(),
            group_by: self.group_by.clone(),
            having: self.having.clone(),
            order_by: SmallVec::new(),
            page: None,
        };

        SQL::token(Token::SELECT)
            .append(rosterdsl_core::expr::count_all())
            .push(Token::FROM)
            .append(inner.into_sql().alias("counted"))
    }

    /// The query as a parenthesized scalar expression.
    pub fn as_scalar(self) -> SQL<'a> {
        self.into_sql().parens()
    }
}

impl<'a> ToSQL<'a> for SelectQuery<'a> {
    fn to_sql(&self) -> SQL<'a> {
        self.clone().into_sql()
    }

    fn into_sql(self) -> SQL<'a> {
        let mut sql = SQL::token(Token::SELECT);
        if self.distinct {
            sql = sql.push(Token::DISTINCT);
        }
        sql = sql.append(SQL::join(self.columns, Token::COMMA));

        if let Some(table) = self.from {
            sql = sql.push(Token::FROM).push(table);
        }
        for join in self.joins {
            sql = sql.append(join.into_sql());
        }
        sql = sql.append(self.predicate.where_clause());

        if !self.group_by.is_empty() {
            sql = sql
                .push(Token::GROUP_BY)
                .append(SQL::join(self.group_by, Token::COMMA));
        }
        sql = sql.append(self.having.clause(Token::HAVING));

        if !self.order_by.is_empty() {
            sql = sql
                .push(Token::ORDER_BY)
                .append(SQL::join(self.order_by, Token::COMMA));
        }
        if let Some(page) = self.page {
            sql = sql.append(page.to_sql());
        }
        sql
    }
}
