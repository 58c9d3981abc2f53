//! One condition function per search criterion.
//!
//! Each function returns `None` when its criterion is absent. A blank or
//! whitespace-only string counts as absent. [`search_predicate`] folds
//! whatever is present with AND.

use rosterdsl_core::Predicate;
use rosterdsl_core::expr::{Condition, eq, gte, lte};

use crate::criteria::MemberSearchCondition;
use crate::schema::{MEMBER, TEAM};

/// True when `value` is present and has at least one non-whitespace character.
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn username_eq(username: Option<&str>) -> Option<Condition<'_>> {
    let username = username.filter(|u| has_text(Some(*u)))?;
    Some(eq(MEMBER.username, username))
}

/// Requires the `team` join to be present in the query.
pub fn team_name_eq(team_name: Option<&str>) -> Option<Condition<'_>> {
    let team_name = team_name.filter(|t| has_text(Some(*t)))?;
    Some(eq(TEAM.name, team_name))
}

pub fn age_goe<'a>(age: Option<i64>) -> Option<Condition<'a>> {
    age.map(|age| gte(MEMBER.age, age))
}

pub fn age_loe<'a>(age: Option<i64>) -> Option<Condition<'a>> {
    age.map(|age| lte(MEMBER.age, age))
}

/// The conjunction of every present criterion.
///
/// ```ignore
/// let cond = MemberSearchCondition::new().with_age_goe(30);
/// search_predicate(&cond).where_clause()
/// // WHERE "member"."age" >= ?
/// ```
pub fn search_predicate(condition: &MemberSearchCondition) -> Predicate<'_> {
    Predicate::all([
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ])
}
