//! The `member` and `team` tables.
//!
//! ```text
//! team   (id INTEGER PK, name TEXT NOT NULL)
//! member (id INTEGER PK, username TEXT NULL, age INTEGER NOT NULL,
//!         team_id INTEGER NULL REFERENCES team(id))
//! ```

use rosterdsl_core::{Column, FromRow, Result, Row, Table};

/// Descriptor for `member`, referenced by its own name.
pub const MEMBER: MemberTable = MemberTable::new(Table::new("member"));

/// Descriptor for `team`, referenced by its own name.
pub const TEAM: TeamTable = TeamTable::new(Table::new("team"));

// =============================================================================
// member
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberTable {
    pub table: Table,
    pub id: Column,
    pub username: Column,
    pub age: Column,
    pub team_id: Column,
}

impl MemberTable {
    const fn new(table: Table) -> Self {
        Self {
            table,
            id: table.column("id"),
            username: table.column("username"),
            age: table.column("age"),
            team_id: table.column("team_id"),
        }
    }

    /// The same table under another alias, for subqueries and self joins.
    ///
    /// ```ignore
    /// let member_sub = MEMBER.alias("member_sub");
    /// select(max(member_sub.age)).from(member_sub.table)
    /// ```
    pub const fn alias(self, alias: &'static str) -> Self {
        Self::new(self.table.alias(alias))
    }

    /// Every column in declaration order, matching [`Member`]'s row layout.
    pub const fn columns(&self) -> [Column; 4] {
        [self.id, self.username, self.age, self.team_id]
    }
}

// =============================================================================
// team
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamTable {
    pub table: Table,
    pub id: Column,
    pub name: Column,
}

impl TeamTable {
    const fn new(table: Table) -> Self {
        Self {
            table,
            id: table.column("id"),
            name: table.column("name"),
        }
    }

    pub const fn alias(self, alias: &'static str) -> Self {
        Self::new(self.table.alias(alias))
    }

    pub const fn columns(&self) -> [Column; 2] {
        [self.id, self.name]
    }
}

// =============================================================================
// Entities
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
}

impl FromRow for Member {
    const COLUMN_COUNT: usize = 4;

    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            username: row.get(offset + 1)?,
            age: row.get(offset + 2)?,
            team_id: row.get(offset + 3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

impl FromRow for Team {
    const COLUMN_COUNT: usize = 2;

    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
        })
    }
}

/// Insert payload for `member`; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: i64,
    pub team_id: Option<i64>,
}

impl NewMember {
    pub fn new(username: impl Into<String>, age: i64) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// A member whose username is NULL.
    pub fn anonymous(age: i64) -> Self {
        Self {
            username: None,
            age,
            team_id: None,
        }
    }

    pub fn with_team(mut self, team: &Team) -> Self {
        self.team_id = Some(team.id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// =============================================================================
// DDL
// =============================================================================

const CREATE_TEAM: &str = r#"CREATE TABLE IF NOT EXISTS "team" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "name" TEXT NOT NULL
)"#;

const CREATE_MEMBER: &str = r#"CREATE TABLE IF NOT EXISTS "member" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "username" TEXT,
    "age" INTEGER NOT NULL,
    "team_id" INTEGER REFERENCES "team" ("id")
)"#;

/// Creates both tables, `team` first.
pub fn create_tables(conn: &rusqlite::Connection) -> Result<()> {
    rosterdsl_core::roster_trace_query!(CREATE_TEAM, 0);
    conn.execute(CREATE_TEAM, [])?;
    rosterdsl_core::roster_trace_query!(CREATE_MEMBER, 0);
    conn.execute(CREATE_MEMBER, [])?;
    Ok(())
}
