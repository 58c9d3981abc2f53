//! Expression builders.
//!
//! Conditions are typed as [`Condition`] so they can only land in boolean
//! positions (`WHERE`, `ON`, `HAVING`, `CASE WHEN`). Every other expression is
//! a plain [`SQL`](crate::SQL) fragment.

mod agg;
mod case;
mod cmp;
mod logical;
mod ops;

pub use agg::*;
pub use case::*;
pub use cmp::*;
pub use logical::*;
pub use ops::*;
