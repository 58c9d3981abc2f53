//! ToSQL trait for converting types to SQL fragments.

use crate::schema::{Column, Table};
use crate::sql::SQL;
use crate::value::Value;

/// Trait for types that can be converted to SQL fragments.
///
/// The `'a` lifetime ties any borrowed parameter values to the resulting SQL
/// fragment, allowing zero-copy SQL construction when inputs are already
/// borrowed.
pub trait ToSQL<'a> {
    fn to_sql(&self) -> SQL<'a>;

    /// Consume self and return SQL without cloning.
    /// Default delegates to `to_sql()`. Types that own their SQL override this.
    fn into_sql(self) -> SQL<'a>
    where
        Self: Sized,
    {
        self.to_sql()
    }

    fn alias(&self, alias: &'a str) -> SQL<'a> {
        self.to_sql().alias(alias)
    }
}

impl<'a, T: ToSQL<'a>> ToSQL<'a> for &T {
    fn to_sql(&self) -> SQL<'a> {
        (**self).to_sql()
    }
}

impl<'a> ToSQL<'a> for Column {
    fn to_sql(&self) -> SQL<'a> {
        SQL::column(*self)
    }
}

impl<'a> ToSQL<'a> for Table {
    fn to_sql(&self) -> SQL<'a> {
        SQL::table(*self)
    }
}

impl<'a> ToSQL<'a> for Value<'a> {
    fn to_sql(&self) -> SQL<'a> {
        SQL::param(self.clone())
    }

    fn into_sql(self) -> SQL<'a> {
        SQL::param(self)
    }
}

macro_rules! impl_to_sql_param {
    ($($ty:ty),*) => { $(
        impl<'a> ToSQL<'a> for $ty {
            #[inline]
            fn to_sql(&self) -> SQL<'a> {
                SQL::param(*self)
            }
        }
    )* }
}

impl_to_sql_param!(i8, i16, i32, i64, u8, u16, u32, f64, bool);

impl<'a> ToSQL<'a> for &'a str {
    fn to_sql(&self) -> SQL<'a> {
        SQL::param(*self)
    }
}

impl<'a> ToSQL<'a> for String {
    fn to_sql(&self) -> SQL<'a> {
        SQL::param(self.clone())
    }

    fn into_sql(self) -> SQL<'a> {
        SQL::param(self)
    }
}
