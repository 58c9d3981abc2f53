//! Composing the member/team search.

use rosterdsl_core::expr::eq;
use rosterdsl_core::{JoinClause, JoinType, Nulls, OrderTerm, Result, RosterError, SQL, ToSQL, asc};

use super::page::Page;
use super::select::{SelectQuery, select};
use crate::criteria::MemberSearchCondition;
use crate::predicate::search_predicate;
use crate::schema::{MEMBER, TEAM};

/// Per-call search settings. Unset fields fall back to configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOptions<'a> {
    pub join: Option<JoinType>,
    pub order: Vec<OrderTerm<'a>>,
    pub page: Option<Page>,
}

impl<'a> SearchOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(mut self, join: JoinType) -> Self {
        self.join = Some(join);
        self
    }

    pub fn order_by(mut self, term: OrderTerm<'a>) -> Self {
        self.order.push(term);
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }
}

/// The flat member/team projection, labelled for [`MemberTeamDto`](crate::projection::MemberTeamDto).
pub fn member_team_columns<'a>() -> [SQL<'a>; 5] {
    [
        MEMBER.id.alias("memberId"),
        MEMBER.username.alias("username"),
        MEMBER.age.alias("age"),
        TEAM.id.alias("teamId"),
        TEAM.name.alias("teamName"),
    ]
}

/// Builds the search query: member joined to team, filtered by every
/// present criterion, ordered, and optionally paged.
///
/// The order always ends with member id unless a caller term already
/// sorts by it, so ties never reorder between pages. `default_nulls`
/// applies to caller terms without a placement.
pub fn compose_search<'a>(
    condition: &'a MemberSearchCondition,
    join: JoinType,
    order: impl IntoIterator<Item = OrderTerm<'a>>,
    default_nulls: Option<Nulls>,
    page: Option<Page>,
) -> Result<SelectQuery<'a>> {
    if join == JoinType::Cross {
        return Err(RosterError::Validation(
            "member search joins team with LEFT or INNER only".into(),
        ));
    }

    let mut order: Vec<OrderTerm<'a>> = order
        .into_iter()
        .map(|term| term.or_nulls(default_nulls))
        .collect();
    let id = MEMBER.id.to_sql();
    if !order.iter().any(|term| *term.expr() == id) {
        order.push(asc(MEMBER.id));
    }

    let query = select(member_team_columns())
        .from(MEMBER.table)
        .join(JoinClause::new(join, TEAM.table, eq(MEMBER.team_id, TEAM.id)))
        .filter(search_predicate(condition))
        .order_by(order);

    Ok(match page {
        Some(page) => query.page(page),
        None => query,
    })
}
