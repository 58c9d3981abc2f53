//! Query composition.

mod aggregate;
mod page;
mod search;
mod select;

pub use aggregate::{AggregateRow, average, compose_aggregate};
pub use page::Page;
pub use search::{SearchOptions, compose_search, member_team_columns};
pub use select::{SelectQuery, select, select_distinct};
