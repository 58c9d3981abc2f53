//! # rosterdsl
//!
//! Dynamic member/team queries composed from optional search criteria,
//! executed on SQLite through rusqlite.
//!
//! ## Quick Start
//!
//! ```rust
//! use rosterdsl::prelude::*;
//!
//! # fn main() -> rosterdsl::Result<()> {
//! let conn = rusqlite::Connection::open_in_memory()?;
//! create_tables(&conn)?;
//!
//! let mut session = Session::new(&conn);
//! let team = session.persist_team(NewTeam::new("teamA"))?;
//! session.persist_member(NewMember::new("member1", 10).with_team(&team))?;
//! session.persist_member(NewMember::new("member2", 20).with_team(&team))?;
//!
//! let repo = MemberRepository::new(&conn);
//! let found = repo.search(&MemberSearchCondition::new().with_age_goe(15))?;
//! assert_eq!(found.results.len(), 1);
//! assert_eq!(found.results[0].username.as_deref(), Some("member2"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! | Module         | Role                                                       |
//! |----------------|------------------------------------------------------------|
//! | [`criteria`]   | optional search parameters                                  |
//! | [`predicate`]  | one condition per criterion, folded with AND               |
//! | [`query`]      | immutable SELECT query, search and aggregate shapes          |
//! | [`executor`]   | runs statements, single-row and paged reads                 |
//! | [`projection`] | DTOs, scalar and tuple shapes                               |
//! | [`bulk`]       | bulk UPDATE / DELETE                                        |
//! | [`session`]    | identity map and its staleness after bulk writes            |
//! | [`repository`] | the public search / aggregate / bulk API                    |

pub mod bulk;
pub mod config;
pub mod criteria;
pub mod executor;
pub mod predicate;
pub mod projection;
pub mod query;
pub mod repository;
pub mod schema;
pub mod session;

pub use rosterdsl_core as core;
pub use rosterdsl_core::{ErrorKind, Result, RosterError};

/// Everything needed to compose and run queries.
pub mod prelude {
    pub use rosterdsl_core::expr::*;
    pub use rosterdsl_core::{
        Column, Condition, ErrorKind, FromNamedRow, FromRow, JoinClause, JoinType, Nulls,
        OrderBy, OrderTerm, Predicate, Row, RosterError, SQL, Table, ToSQL, Value, asc,
        desc,
    };

    pub use crate::bulk::{Assignment, BulkDelete, BulkUpdate};
    pub use crate::config::{AverageMode, QueryConfig};
    pub use crate::criteria::MemberSearchCondition;
    pub use crate::executor::Executor;
    pub use crate::predicate::*;
    pub use crate::projection::*;
    pub use crate::query::*;
    pub use crate::repository::{MemberRepository, SearchResult};
    pub use crate::schema::*;
    pub use crate::session::{BulkOutcome, Session};
}
