//! Member search, aggregation and bulk mutation over one connection.

use rosterdsl_core::expr::eq;
use rosterdsl_core::{Column, FromRow, Predicate, Result};
use rusqlite::Connection;

use crate::bulk::{Assignment, BulkDelete, BulkUpdate};
use crate::config::QueryConfig;
use crate::criteria::MemberSearchCondition;
use crate::executor::Executor;
use crate::projection::{MemberTeamDto, project, project_named};
use crate::query::{AggregateRow, SearchOptions, compose_aggregate, compose_search, select};
use crate::schema::{MEMBER, Member};

/// A page of search results and, when a page was requested, the total
/// number of matches ignoring the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub results: Vec<MemberTeamDto>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct MemberRepository<'c> {
    executor: Executor<'c>,
    config: QueryConfig,
}

impl<'c> MemberRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self::with_config(conn, QueryConfig::default())
    }

    pub fn with_config(conn: &'c Connection, config: QueryConfig) -> Self {
        Self {
            executor: Executor::new(conn),
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Members matching every present criterion, joined to their team.
    pub fn search(&self, condition: &MemberSearchCondition) -> Result<SearchResult> {
        self.search_with(condition, SearchOptions::default())
    }

    /// [`search`](Self::search) with an explicit join, ordering and page.
    ///
    /// `total` is set only when `options.page` is.
    pub fn search_with<'a>(
        &self,
        condition: &'a MemberSearchCondition,
        options: SearchOptions<'a>,
    ) -> Result<SearchResult> {
        if let Some(page) = options.page {
            page.check_max(self.config.max_page_size)?;
        }
        let query = compose_search(
            condition,
            options.join.unwrap_or(self.config.join),
            options.order,
            self.config.nulls,
            options.page,
        )?;

        let (rows, total) = match options.page {
            Some(_) => {
                let (rows, total) = self.executor.fetch_page(&query)?;
                (rows, Some(total))
            }
            None => (self.executor.fetch(&query)?, None),
        };
        Ok(SearchResult {
            results: project(&rows)?,
            total,
        })
    }

    /// Count, sum, average, minimum and maximum of age over the matching
    /// members, one row per value of `group_by` or a single row without it.
    pub fn aggregate(
        &self,
        condition: &MemberSearchCondition,
        group_by: Option<Column>,
    ) -> Result<Vec<AggregateRow>> {
        let query = compose_aggregate(condition, group_by, self.config.average);
        project_named(&self.executor.fetch(&query)?)
    }

    /// Number of members matching `condition`, through the configured join.
    pub fn count(&self, condition: &MemberSearchCondition) -> Result<u64> {
        let query = compose_search(condition, self.config.join, Vec::new(), None, None)?;
        self.executor.count(&query)
    }

    /// The single member named `username`.
    pub fn find_by_username(&self, username: &str) -> Result<Option<Member>> {
        let query = select(MEMBER.columns())
            .from(MEMBER.table)
            .filter(eq(MEMBER.username, username));
        self.executor
            .fetch_optional(&query)?
            .map(|row| Member::from_row(&row))
            .transpose()
    }

    /// Applies `assignments` to every member matching `filter`.
    ///
    /// The statement bypasses any [`Session`](crate::session::Session); mapped
    /// copies there go stale.
    pub fn bulk_update<'a, I>(&self, filter: impl Into<Predicate<'a>>, assignments: I) -> Result<usize>
    where
        I: IntoIterator<Item = (Column, Assignment<'a>)>,
    {
        assignments
            .into_iter()
            .fold(BulkUpdate::new(MEMBER.table), |update, (column, assignment)| {
                update.assign(column, assignment)
            })
            .filter(filter)
            .execute(&self.executor)
    }

    /// Deletes every member matching `filter`.
    pub fn bulk_delete<'a>(&self, filter: impl Into<Predicate<'a>>) -> Result<usize> {
        BulkDelete::new(MEMBER.table)
            .filter(filter)
            .execute(&self.executor)
    }
}
