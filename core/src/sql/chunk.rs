use std::borrow::Cow;
use std::fmt::Write;

use crate::schema::{Column, Table};
use crate::sql::tokens::Token;
use crate::value::Value;

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("table_name", "column_name")
/// - `Raw` - Unquoted raw SQL text (function names, literals)
/// - `Number` - Unsigned integer literal (LIMIT/OFFSET)
/// - `Param` - A bound value rendered as `?`
/// - `Table` - Table reference, renders with its alias when aliased
/// - `Column` - Column reference qualified by its table alias
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk<'a> {
    /// SQL keywords and operators: SELECT, FROM, WHERE, =, AND, etc.
    Token(Token),

    /// Quoted identifier for user-provided names
    /// Renders as: "name" (with quotes)
    Ident(Cow<'a, str>),

    /// Raw SQL text (unquoted) for function names and literals
    Raw(Cow<'a, str>),

    /// Renders as the decimal literal
    Number(u64),

    /// Renders as: ?
    Param(Value<'a>),

    /// Renders as: "name" or "name" AS "alias"
    Table(Table),

    /// Renders as: "alias"."column"
    Column(Column),
}

impl<'a> SQLChunk<'a> {
    /// Renders the chunk. Identifiers are double-quoted, values become `?`.
    pub(crate) fn write(&self, buf: &mut impl Write) {
        let _ = match self {
            SQLChunk::Token(token) => buf.write_str(token.as_str()),
            SQLChunk::Ident(name) => write!(buf, "\"{name}\""),
            SQLChunk::Raw(text) => buf.write_str(text),
            SQLChunk::Number(n) => write!(buf, "{n}"),
            SQLChunk::Param(_) => buf.write_char('?'),
            SQLChunk::Table(table) if table.is_aliased() => {
                write!(buf, "\"{}\" AS \"{}\"", table.name(), table.alias_name())
            }
            SQLChunk::Table(table) => write!(buf, "\"{}\"", table.name()),
            SQLChunk::Column(column) => {
                write!(buf, "\"{}\".\"{}\"", column.table().alias_name(), column.name())
            }
        };
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !matches!(
                t,
                Token::LPAREN | Token::RPAREN | Token::COMMA | Token::SEMI | Token::DOT
            ) && !t.is_operator(),
            SQLChunk::Ident(_)
            | SQLChunk::Raw(_)
            | SQLChunk::Number(_)
            | SQLChunk::Param(_)
            | SQLChunk::Table(_)
            | SQLChunk::Column(_) => true,
        }
    }
}

// ==================== From implementations ====================

impl<'a> From<Token> for SQLChunk<'a> {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl<'a> From<Column> for SQLChunk<'a> {
    #[inline]
    fn from(value: Column) -> Self {
        Self::Column(value)
    }
}

impl<'a> From<Table> for SQLChunk<'a> {
    #[inline]
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

impl<'a> From<Value<'a>> for SQLChunk<'a> {
    #[inline]
    fn from(value: Value<'a>) -> Self {
        Self::Param(value)
    }
}
