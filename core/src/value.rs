//! Parameter and result values.
//!
//! [`Value`] is both what gets bound to a `?` placeholder and what a result
//! column decodes into. Text borrows from the caller where it can, so
//! criteria strings flow into a query without copying.

use std::borrow::Cow;

use crate::error::{Result, RosterError};

/// A single SQL value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value<'a> {
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value (borrowed or owned string)
    Text(Cow<'a, str>),
    /// NULL value
    #[default]
    Null,
}

impl<'a> Value<'a> {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Detaches the value from any borrowed input.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Integer(i) => Value::Integer(i),
            Value::Real(r) => Value::Real(r),
            Value::Text(s) => Value::Text(Cow::Owned(s.into_owned())),
            Value::Null => Value::Null,
        }
    }

    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(RosterError::Mapping(format!(
                "expected INTEGER, found {}",
                other.type_name()
            ))),
        }
    }

    /// Reads a numeric value as `f64`; integers widen.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(RosterError::Mapping(format!(
                "expected REAL, found {}",
                other.type_name()
            ))),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(RosterError::Mapping(format!(
                "expected TEXT, found {}",
                other.type_name()
            ))),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Null => "NULL",
        }
    }
}

impl core::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => write!(f, "'{s}'"),
            Value::Null => f.write_str("NULL"),
        }
    }
}

//------------------------------------------------------------------------------
// From implementations
//------------------------------------------------------------------------------

macro_rules! impl_from_integer {
    ($($ty:ty),*) => { $(
        impl<'a> From<$ty> for Value<'a> {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::Integer(i64::from(value))
            }
        }
    )* }
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, bool);

impl<'a> From<f64> for Value<'a> {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Value::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<String> for Value<'a> {
    #[inline]
    fn from(value: String) -> Self {
        Value::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Value::Text(Cow::Borrowed(value.as_str()))
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

//------------------------------------------------------------------------------
// rusqlite implementations
//------------------------------------------------------------------------------

#[cfg(feature = "rusqlite")]
impl<'a> rusqlite::ToSql for Value<'a> {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value as Raw, ValueRef};
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(Raw::Null),
            Value::Integer(i) => ToSqlOutput::Owned(Raw::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(Raw::Real(*r)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

#[cfg(feature = "rusqlite")]
impl From<rusqlite::types::ValueRef<'_>> for Value<'static> {
    fn from(value: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(bytes) => {
                Value::Text(Cow::Owned(String::from_utf8_lossy(bytes).into_owned()))
            }
            // Blob columns never appear in this schema; surface them as hex text.
            ValueRef::Blob(bytes) => Value::Text(Cow::Owned(
                bytes.iter().map(|b| format!("{b:02x}")).collect(),
            )),
        }
    }
}
