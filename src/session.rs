//! Identity-mapped unit of work over one connection.
//!
//! A [`Session`] hands out one in-memory copy per entity id. Once an id is
//! mapped, later reads return the mapped copy instead of the freshly read
//! row.
//!
//! # Bulk mutations and staleness
//!
//! [`Session::bulk_update`] and [`Session::bulk_delete`] write straight to the
//! store and leave mapped copies untouched. After one of them changes any
//! row, the session is *stale*: mapped copies may disagree with the store
//! until [`Session::clear`] is called. Reads through a stale session log a
//! warning.
//!
//! ```ignore
//! let outcome = session.bulk_update(&update)?;
//! session.clear();
//! let fresh = session.load_members(&query)?;
//! ```

use hashbrown::HashMap;
use rosterdsl_core::expr::eq;
use rosterdsl_core::{FromRow, Result, RosterError, SQL, Table, Token, Value, roster_trace_cache};
use rusqlite::Connection;

use crate::bulk::{BulkDelete, BulkUpdate};
use crate::executor::Executor;
use crate::query::{SelectQuery, select};
use crate::schema::{MEMBER, Member, NewMember, NewTeam, TEAM, Team};

/// Rows changed by a bulk statement.
///
/// The session that ran it is stale until cleared.
#[must_use = "a bulk mutation leaves the session stale; call `Session::clear` before reading again"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    affected: usize,
}

impl BulkOutcome {
    pub const fn affected(&self) -> usize {
        self.affected
    }
}

#[derive(Debug)]
pub struct Session<'c> {
    executor: Executor<'c>,
    members: HashMap<i64, Member>,
    teams: HashMap<i64, Team>,
    stale: bool,
}

impl<'c> Session<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            executor: Executor::new(conn),
            members: HashMap::new(),
            teams: HashMap::new(),
            stale: false,
        }
    }

    pub const fn executor(&self) -> &Executor<'c> {
        &self.executor
    }

    /// True after a bulk mutation changed rows and before the next [`clear`](Self::clear).
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of mapped entities.
    pub fn len(&self) -> usize {
        self.members.len() + self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.teams.is_empty()
    }

    pub fn contains_member(&self, id: i64) -> bool {
        self.members.contains_key(&id)
    }

    /// Drops every mapped entity and the stale flag.
    pub fn clear(&mut self) {
        roster_trace_cache!(debug, "clear", self.len());
        self.members.clear();
        self.teams.clear();
        self.stale = false;
    }

    // ==================== persistence ====================

    pub fn persist_team(&mut self, team: NewTeam) -> Result<Team> {
        let id = self.insert(TEAM.table, &[TEAM.name.name()], vec![team.name.clone().into()])?;
        let team = Team {
            id,
            name: team.name,
        };
        self.teams.insert(id, team.clone());
        Ok(team)
    }

    pub fn persist_member(&mut self, member: NewMember) -> Result<Member> {
        let id = self.insert(
            MEMBER.table,
            &[MEMBER.username.name(), MEMBER.age.name(), MEMBER.team_id.name()],
            vec![
                member.username.clone().into(),
                member.age.into(),
                member.team_id.into(),
            ],
        )?;
        let member = Member {
            id,
            username: member.username,
            age: member.age,
            team_id: member.team_id,
        };
        self.members.insert(id, member.clone());
        Ok(member)
    }

    /// Writes every field of one member and replaces its mapped copy.
    pub fn update_member(&mut self, member: &Member) -> Result<()> {
        let update = BulkUpdate::new(MEMBER.table)
            .set(MEMBER.username, member.username.as_deref())
            .set(MEMBER.age, member.age)
            .set(MEMBER.team_id, member.team_id)
            .filter(eq(MEMBER.id, member.id));
        if self.executor.execute_statement(update.statement()?)? == 0 {
            return Err(RosterError::NotFound);
        }
        self.members.insert(member.id, member.clone());
        Ok(())
    }

    pub fn remove_member(&mut self, id: i64) -> Result<()> {
        let delete = BulkDelete::new(MEMBER.table).filter(eq(MEMBER.id, id));
        if self.executor.execute_statement(delete.statement())? == 0 {
            return Err(RosterError::NotFound);
        }
        self.members.remove(&id);
        Ok(())
    }

    fn insert(&self, table: Table, columns: &[&'static str], values: Vec<Value<'_>>) -> Result<i64> {
        let sql = SQL::token(Token::INSERT)
            .push(Token::INTO)
            .push(table)
            .append(SQL::join(columns.iter().map(|c| SQL::ident(*c)), Token::COMMA).parens())
            .push(Token::VALUES)
            .append(SQL::join(values, Token::COMMA).parens());
        self.executor.execute_statement(sql)?;
        Ok(self.executor.conn().last_insert_rowid())
    }

    // ==================== reads ====================

    /// The mapped copy if present, otherwise loads and maps the row.
    pub fn find_member(&mut self, id: i64) -> Result<Option<Member>> {
        self.warn_if_stale();
        if let Some(member) = self.members.get(&id) {
            return Ok(Some(member.clone()));
        }
        let query = select(MEMBER.columns())
            .from(MEMBER.table)
            .filter(eq(MEMBER.id, id));
        let Some(row) = self.executor.fetch_optional(&query)? else {
            return Ok(None);
        };
        let member = Member::from_row(&row)?;
        self.members.insert(id, member.clone());
        Ok(Some(member))
    }

    pub fn find_team(&mut self, id: i64) -> Result<Option<Team>> {
        self.warn_if_stale();
        if let Some(team) = self.teams.get(&id) {
            return Ok(Some(team.clone()));
        }
        let query = select(TEAM.columns())
            .from(TEAM.table)
            .filter(eq(TEAM.id, id));
        let Some(row) = self.executor.fetch_optional(&query)? else {
            return Ok(None);
        };
        let team = Team::from_row(&row)?;
        self.teams.insert(id, team.clone());
        Ok(Some(team))
    }

    /// Runs `query`, which must select the member columns first, and maps
    /// every row by id. Rows whose id is already mapped yield the mapped
    /// copy, which may be stale.
    pub fn load_members(&mut self, query: &SelectQuery<'_>) -> Result<Vec<Member>> {
        self.warn_if_stale();
        let rows = self.executor.fetch(query)?;
        rows.iter()
            .map(|row| {
                let loaded = Member::from_row(row)?;
                Ok(self
                    .members
                    .entry(loaded.id)
                    .or_insert(loaded)
                    .clone())
            })
            .collect()
    }

    fn warn_if_stale(&self) {
        if self.stale {
            roster_trace_cache!(warn, "stale_read", self.len());
        }
    }

    // ==================== bulk ====================

    /// Runs a bulk update directly against the store.
    ///
    /// Mapped copies are not refreshed. If any row changed, the session is
    /// stale until [`clear`](Self::clear).
    pub fn bulk_update(&mut self, update: &BulkUpdate<'_>) -> Result<BulkOutcome> {
        let affected = update.execute(&self.executor)?;
        self.stale |= affected > 0;
        Ok(BulkOutcome { affected })
    }

    /// Runs a bulk delete directly against the store.
    ///
    /// Deleted entities stay mapped until [`clear`](Self::clear).
    pub fn bulk_delete(&mut self, delete: &BulkDelete<'_>) -> Result<BulkOutcome> {
        let affected = delete.execute(&self.executor)?;
        self.stale |= affected > 0;
        Ok(BulkOutcome { affected })
    }
}
