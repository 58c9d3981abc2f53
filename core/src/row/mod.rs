//! Result rows and offset-based row extraction.
//!
//! A [`Row`] is a detached copy of one result row: its column labels and
//! values. Decoding a row never touches the store again.
//!
//! ```text
//! SELECT "member"."id", "member"."username", "team"."id", "team"."name" ...
//!        |------------ A -----------------|  |---------- B ----------|
//! <(A, B)>::from_row(row)   // A at offset 0, B at offset A::COLUMN_COUNT
//! ```

#[cfg(feature = "rusqlite")]
mod rusqlite;

#[cfg(feature = "rusqlite")]
pub use self::rusqlite::statement_labels;

use std::sync::Arc;

use crate::error::{Result, RosterError};
use crate::value::Value;

/// An owned result row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    labels: Arc<[String]>,
    values: Vec<Value<'static>>,
}

impl Row {
    /// Builds a row. Rows of one result set share their label slice.
    pub fn new(labels: Arc<[String]>, values: Vec<Value<'static>>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(RosterError::Mapping(format!(
                "{} labels for {} values",
                labels.len(),
                values.len()
            )));
        }
        Ok(Self { labels, values })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Value<'static>] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Result<&Value<'static>> {
        self.values.get(index).ok_or_else(|| {
            RosterError::Mapping(format!(
                "column {index} out of range for a row of {} columns",
                self.values.len()
            ))
        })
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Decodes `T` at column `index`.
    pub fn get<T: FromRow>(&self, index: usize) -> Result<T> {
        T::from_row_at(self, index)
    }

    /// Decodes `T` from the column labelled `label`.
    pub fn get_named<T: FromRow>(&self, label: &str) -> Result<T> {
        let index = self
            .index_of(label)
            .ok_or_else(|| RosterError::Mapping(format!("no column labelled `{label}`")))?;
        T::from_row_at(self, index)
    }
}

// =============================================================================
// FromRow — offset-based row extraction
// =============================================================================

/// Extracts a Rust value from a row at a given column offset.
///
/// Tuple impls compose: `(A, B)` reads A at `offset`, then B at
/// `offset + A::COLUMN_COUNT`.
#[diagnostic::on_unimplemented(
    message = "cannot decode `{Self}` from a result row",
    label = "this type does not implement FromRow"
)]
pub trait FromRow: Sized {
    /// Number of columns this type reads from the row.
    const COLUMN_COUNT: usize;

    /// Read this type from `row` starting at column `offset`.
    fn from_row_at(row: &Row, offset: usize) -> Result<Self>;

    /// Read from offset 0.
    fn from_row(row: &Row) -> Result<Self> {
        Self::from_row_at(row, 0)
    }
}

/// Matches columns by label instead of position.
///
/// Labels come from `AS` aliases in the select list, so the order of the
/// selected expressions does not matter.
pub trait FromNamedRow: Sized {
    fn from_named_row(row: &Row) -> Result<Self>;
}

// -- Leaf impls --

impl FromRow for Value<'static> {
    const COLUMN_COUNT: usize = 1;
    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        row.value(offset).cloned()
    }
}

impl FromRow for i64 {
    const COLUMN_COUNT: usize = 1;
    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        row.value(offset)?.as_i64()
    }
}

macro_rules! impl_from_row_via_i64 {
    ($($ty:ty),*) => { $(
        impl FromRow for $ty {
            const COLUMN_COUNT: usize = 1;
            fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
                Ok(row.value(offset)?.as_i64()?.try_into()?)
            }
        }
    )* }
}

impl_from_row_via_i64!(i32, u32, u64, usize);

impl FromRow for f64 {
    const COLUMN_COUNT: usize = 1;
    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        row.value(offset)?.as_f64()
    }
}

impl FromRow for bool {
    const COLUMN_COUNT: usize = 1;
    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        Ok(row.value(offset)?.as_i64()? != 0)
    }
}

impl FromRow for String {
    const COLUMN_COUNT: usize = 1;
    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        row.value(offset)?.as_str().map(str::to_owned)
    }
}

// -- Option<T>: NULL-aware wrapper --

impl<T: FromRow> FromRow for Option<T> {
    const COLUMN_COUNT: usize = T::COLUMN_COUNT;
    fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
        if row.value(offset)?.is_null() {
            Ok(None)
        } else {
            T::from_row_at(row, offset).map(Some)
        }
    }
}

// -- Tuple impls --

macro_rules! impl_from_row_tuple {
    ($($T:ident),+) => {
        impl<$($T: FromRow),+> FromRow for ($($T,)+) {
            const COLUMN_COUNT: usize = 0 $(+ <$T as FromRow>::COLUMN_COUNT)+;

            #[allow(non_snake_case)]
            fn from_row_at(row: &Row, offset: usize) -> Result<Self> {
                let mut __off = offset;
                $(
                    let $T = <$T as FromRow>::from_row_at(row, __off)?;
                    __off += <$T as FromRow>::COLUMN_COUNT;
                )+
                let _ = __off;
                Ok(($($T,)+))
            }
        }
    };
}

impl_from_row_tuple!(A);
impl_from_row_tuple!(A, B);
impl_from_row_tuple!(A, B, C);
impl_from_row_tuple!(A, B, C, D);
impl_from_row_tuple!(A, B, C, D, E);
impl_from_row_tuple!(A, B, C, D, E, F);
impl_from_row_tuple!(A, B, C, D, E, F, G);
impl_from_row_tuple!(A, B, C, D, E, F, G, H);
