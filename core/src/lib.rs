//! Dialect-neutral building blocks for composing SQL from optional criteria.
//!
//! Nothing in this crate performs I/O. Fragments are built as flat chunk
//! lists ([`SQL`]) and rendered with `?` placeholders plus an ordered list of
//! bound [`Value`]s.

pub mod error;
pub mod expr;
pub mod join;
pub mod order;
pub mod row;
pub mod schema;
pub mod sql;
mod tracing;
pub mod traits;
pub mod value;

// Re-export key types and traits
pub use error::{ErrorKind, Result, RosterError};
pub use expr::{Condition, Predicate};
pub use join::{JoinClause, JoinType};
pub use order::{Nulls, OrderTerm, asc, desc};
pub use row::{FromNamedRow, FromRow, Row};
pub use schema::{Column, OrderBy, Table};
pub use sql::{SQL, SQLChunk, Token};
pub use traits::ToSQL;
pub use value::Value;
